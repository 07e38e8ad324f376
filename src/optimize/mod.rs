//! The optimization passes and the fixed pipeline that orders them.
//!
//! Structural passes run bottom-up (children before parents) so that
//! flattening a group exposes its children to the parent's own pass
//! invocation; command rewriting runs top-down afterwards, so each final,
//! merged command list is rewritten exactly once.

mod bake_transformations;
mod breakout_implicit_commands;
mod collapse_groups;
mod command_variant;
mod convert_curves_to_arcs;
mod merge_paths;
mod polycommands;
mod remove_empty_groups;
mod remove_redundant_commands;
mod remove_transparent_paths;
mod simplify_bezier_curve_commands;
mod simplify_line_commands;
mod use_shorthand;

pub use bake_transformations::BakeTransformations;
pub use breakout_implicit_commands::BreakoutImplicitCommands;
pub use collapse_groups::CollapseGroups;
pub use command_variant::{ConvertVariant, VariantMode};
pub use convert_curves_to_arcs::{ArcCriterion, ConvertCurvesToArcs};
pub use merge_paths::MergePaths;
pub use polycommands::Polycommands;
pub use remove_empty_groups::RemoveEmptyGroups;
pub use remove_redundant_commands::RemoveRedundantCommands;
pub use remove_transparent_paths::RemoveTransparentPaths;
pub use simplify_bezier_curve_commands::SimplifyBezierCurveCommands;
pub use simplify_line_commands::SimplifyLineCommands;
pub use use_shorthand::UseShorthand;

use crate::element::Element;
use crate::printer::SvgPrinter;
use crate::traversal::{self, Visitor};

#[derive(Debug, Clone)]
pub struct Options {
    /// Decimal places kept when printing numbers.
    pub precision: u8,
    /// Geometric tolerance for straightness and circle-fitting decisions.
    pub tolerance: f64,
    pub merge_paths: bool,
    pub convert_curves_to_arcs: bool,
    /// Upper bound on a merged path's printed length, if any.
    pub max_merged_path_length: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            precision: 3,
            tolerance: 1e-3,
            merge_paths: true,
            convert_curves_to_arcs: true,
            max_merged_path_length: None,
        }
    }
}

/// The fixed pass ordering. Structural reduction first, then command
/// rewriting over the final merged command lists.
pub struct Pipeline {
    bottom_up: Vec<Box<dyn Visitor>>,
    top_down: Vec<Box<dyn Visitor>>,
}

impl Pipeline {
    pub fn new(options: &Options) -> Self {
        let printer = || SvgPrinter::new(options.precision);

        let mut bottom_up: Vec<Box<dyn Visitor>> = vec![
            Box::new(BakeTransformations),
            Box::new(CollapseGroups),
            Box::new(RemoveEmptyGroups),
        ];
        if options.merge_paths {
            bottom_up.push(match options.max_merged_path_length {
                Some(limit) => Box::new(MergePaths::with_length_limit(limit, Box::new(printer()))),
                None => Box::new(MergePaths::new()),
            });
        }

        let mut top_down: Vec<Box<dyn Visitor>> = vec![
            Box::new(RemoveTransparentPaths),
            Box::new(BreakoutImplicitCommands),
            Box::new(ConvertVariant::relative()),
            Box::new(SimplifyLineCommands::new(options.tolerance)),
        ];
        if options.convert_curves_to_arcs {
            top_down.push(Box::new(ConvertCurvesToArcs::new(
                options.tolerance,
                ArcCriterion::ShortestPath(Box::new(printer())),
            )));
        }
        top_down.push(Box::new(SimplifyBezierCurveCommands::new(options.tolerance)));
        top_down.push(Box::new(RemoveRedundantCommands));
        top_down.push(Box::new(ConvertVariant::compact(Box::new(printer()))));
        top_down.push(Box::new(Polycommands));

        Self { bottom_up, top_down }
    }

    /// Run every pass, each as its own full traversal, in the fixed order.
    pub fn apply(&mut self, root: &mut Element) {
        for pass in &mut self.bottom_up {
            traversal::bottom_up(root, pass.as_mut());
        }
        for pass in &mut self.top_down {
            traversal::top_down(root, pass.as_mut());
        }
    }
}

/// Optimize a graphic tree in place with the standard pipeline.
pub fn optimize(root: &mut Element, options: &Options) {
    Pipeline::new(options).apply(root);
}
