//! Merges runs of consecutive sibling paths into one path.
//!
//! Two adjacent candidates merge only when every rendering-affecting
//! attribute matches and their geometry provably cannot interact: disjoint
//! bounding boxes are always safe; overlapping boxes fall back to convex
//! hulls of perimeter samples and a GJK intersection test, where touching
//! hulls block the merge (combining overlapping fills can change what gets
//! painted). Before concatenation the absorbed path's leading command is
//! rewritten to absolute coordinates, since each path's relative space
//! starts at the origin, not at the previous path's end point.

use crate::command::{Command, CommandVariant};
use crate::element::{Element, Path};
use crate::hull::{convex_hull, hulls_intersect};
use crate::printer::CommandPrinter;
use crate::resolver::Resolver;
use crate::surveyor::{find_bounding_box, sample_points};
use crate::traversal::Visitor;

pub struct MergePaths {
    constraint: Option<Constraint>,
}

/// Caps the printed length of any merged path; used for targets with
/// string-table size limits.
pub struct Constraint {
    pub max_length: usize,
    pub printer: Box<dyn CommandPrinter>,
}

impl MergePaths {
    pub fn new() -> Self {
        Self { constraint: None }
    }

    pub fn with_length_limit(max_length: usize, printer: Box<dyn CommandPrinter>) -> Self {
        Self {
            constraint: Some(Constraint {
                max_length,
                printer,
            }),
        }
    }
}

impl Default for MergePaths {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for MergePaths {
    fn visit(&mut self, element: &mut Element) {
        let Some(children) = element.children_mut() else {
            return;
        };

        let previous = std::mem::take(children);
        for child in previous {
            match child {
                Element::Path(path) => {
                    let mergeable = match children.last() {
                        Some(Element::Path(prev)) => {
                            prev.style_eq(&path) && geometry_allows(prev, &path)
                        }
                        _ => false,
                    };
                    if !mergeable {
                        children.push(Element::Path(path));
                        continue;
                    }

                    let Some(Element::Path(prev)) = children.last_mut() else {
                        unreachable!()
                    };
                    let incoming = absolutize_leading(&path.commands);
                    if let Some(constraint) = &self.constraint {
                        let merged = printed_length(&prev.commands, constraint.printer.as_ref())
                            + printed_length(&incoming, constraint.printer.as_ref());
                        if merged > constraint.max_length {
                            children.push(Element::Path(path));
                            continue;
                        }
                    }
                    prev.commands.extend(incoming);
                }
                other => children.push(other),
            }
        }
    }
}

/// Disjoint bounding boxes are always safe. Overlapping boxes get the
/// precise check: intersecting hulls block the merge.
fn geometry_allows(a: &Path, b: &Path) -> bool {
    let (Some(bounds_a), Some(bounds_b)) =
        (find_bounding_box(&a.commands), find_bounding_box(&b.commands))
    else {
        // One of the paths draws nothing; merging cannot change rendering.
        return true;
    };
    if !bounds_a.intersects(&bounds_b) {
        return true;
    }

    let hull_a = convex_hull(&sample_points(&a.commands));
    let hull_b = convex_hull(&sample_points(&b.commands));
    !hulls_intersect(&hull_a, &hull_b)
}

/// Each path's relative coordinate space starts at the origin, so the leading
/// command must become absolute before the commands are appended after
/// another path's.
fn absolutize_leading(commands: &[Command]) -> Vec<Command> {
    let Some((first, rest)) = commands.split_first() else {
        return Vec::new();
    };
    let mut resolver = Resolver::new();
    let mut out = vec![resolver.resolve(first, CommandVariant::Absolute)];
    out.extend_from_slice(rest);
    out
}

fn printed_length(commands: &[Command], printer: &dyn CommandPrinter) -> usize {
    commands.iter().map(|c| printer.print(c).len()).sum()
}
