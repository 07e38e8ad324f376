//! Dissolves groups that no longer do anything: no id, identity transform,
//! no foreign attributes. Their children move up into the parent's list.
//! Groups holding a clip-path child are kept; clip semantics need the
//! dedicated container.

use crate::element::Element;
use crate::traversal::Visitor;

pub struct CollapseGroups;

impl Visitor for CollapseGroups {
    fn visit(&mut self, element: &mut Element) {
        let Some(children) = element.children_mut() else {
            return;
        };

        let previous = std::mem::take(children);
        for child in previous {
            match child {
                Element::Group(group)
                    if group.is_unmarked()
                        && !group.children.is_empty()
                        && !group
                            .children
                            .iter()
                            .any(|c| matches!(c, Element::ClipPath(_))) =>
                {
                    children.extend(group.children);
                }
                other => children.push(other),
            }
        }
    }
}
