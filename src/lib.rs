//! whittle - a vector-graphic path optimizer
//!
//! whittle rewrites an SVG's element tree into a geometrically equivalent
//! but smaller form: transforms are baked into path data, groups are
//! flattened, compatible sibling paths merged, and each path's commands
//! rewritten into their shortest spelling (relative/absolute per command,
//! axis-aligned lines, arcs recovered from circular curve runs).

mod command;
mod curves;
mod element;
mod error;
mod hull;
mod math;
mod optimize;
mod parse;
mod pathdata;
mod printer;
mod resolver;
mod serialize;
mod surveyor;
mod traversal;

pub use command::*;
pub use element::*;
pub use error::*;
pub use math::{Circle, LineSegment, Matrix3, Point, Rectangle};
pub use optimize::*;
pub use parse::*;
pub use pathdata::*;
pub use printer::{CommandPrinter, SvgPrinter, format_number};
pub use resolver::{Resolver, convert};
pub use serialize::*;
pub use traversal::{Visitor, bottom_up, top_down};

/// Optimize an SVG string with default settings.
pub fn whittle(svg: &str) -> Result<String, WhittleError> {
    whittle_with_options(svg, &Options::default())
}

/// Optimize an SVG string with custom options.
pub fn whittle_with_options(svg: &str, options: &Options) -> Result<String, WhittleError> {
    let mut root = parse_svg(svg)?;
    optimize(&mut root, options);
    Ok(serialize(&root, options.precision))
}
