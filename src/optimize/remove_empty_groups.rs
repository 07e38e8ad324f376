//! Prunes a contiguous leading run of recursively-empty groups from each
//! container's child list. Empty groups after a non-empty sibling are left
//! where they are.

use crate::element::{Element, Group};
use crate::traversal::Visitor;

pub struct RemoveEmptyGroups;

impl Visitor for RemoveEmptyGroups {
    fn visit(&mut self, element: &mut Element) {
        let Some(children) = element.children_mut() else {
            return;
        };

        let prefix = children
            .iter()
            .take_while(|child| match child {
                Element::Group(group) => is_recursively_empty(group),
                _ => false,
            })
            .count();
        children.drain(..prefix);
    }
}

/// A group is recursively empty when nothing about it matters (no id, no
/// transform, no foreign attributes) and every child is itself a recursively
/// empty group.
fn is_recursively_empty(group: &Group) -> bool {
    group.is_unmarked()
        && group.children.iter().all(|child| match child {
            Element::Group(inner) => is_recursively_empty(inner),
            _ => false,
        })
}
