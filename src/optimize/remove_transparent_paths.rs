//! Drops paths that cannot paint anything: fill and stroke both fully
//! transparent. A path with an id may be animated into visibility, and a
//! foreign attribute whose key mentions "color" may resolve to a visible
//! paint at runtime, so both keep the path alive.

use crate::element::{Element, Path};
use crate::traversal::Visitor;

pub struct RemoveTransparentPaths;

impl Visitor for RemoveTransparentPaths {
    fn visit(&mut self, element: &mut Element) {
        let Some(children) = element.children_mut() else {
            return;
        };

        children.retain(|child| match child {
            Element::Path(path) => !is_invisible(path),
            _ => true,
        });
    }
}

fn is_invisible(path: &Path) -> bool {
    path.fill.is_transparent()
        && path.stroke.is_transparent()
        && path.id.is_none()
        && !path
            .foreign
            .iter()
            .any(|attr| attr.name.to_ascii_lowercase().contains("color"))
}
