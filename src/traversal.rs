//! Generic tree visitation.
//!
//! Passes are visitors dispatched once per element; a pass that does not care
//! about an element kind simply ignores it in its match. Bottom-up traversal
//! visits children before their parent (structural passes rewrite child
//! lists); top-down visits the parent first (content passes rewrite commands
//! the structural passes have already settled).

use crate::element::Element;

/// A single optimization pass over the element tree.
pub trait Visitor {
    fn visit(&mut self, element: &mut Element);
}

/// Post-order walk: children first, then the element itself.
pub fn bottom_up(element: &mut Element, visitor: &mut dyn Visitor) {
    if let Some(children) = element.children_mut() {
        for child in children.iter_mut() {
            bottom_up(child, visitor);
        }
    }
    visitor.visit(element);
}

/// Pre-order walk: the element first, then its children.
pub fn top_down(element: &mut Element, visitor: &mut dyn Visitor) {
    visitor.visit(element);
    if let Some(children) = element.children_mut() {
        for child in children.iter_mut() {
            top_down(child, visitor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Graphic, Group, Path};

    struct Recorder {
        names: Vec<&'static str>,
    }

    impl Visitor for Recorder {
        fn visit(&mut self, element: &mut Element) {
            self.names.push(match element {
                Element::Graphic(_) => "graphic",
                Element::Group(_) => "group",
                Element::Path(_) => "path",
                Element::ClipPath(_) => "clip-path",
                Element::Extra(_) => "extra",
                Element::Text(_) => "text",
                Element::CData(_) => "cdata",
            });
        }
    }

    fn tree() -> Element {
        Element::Graphic(Graphic {
            children: vec![Element::Group(Group {
                children: vec![Element::Path(Path::default())],
                ..Group::default()
            })],
            ..Graphic::default()
        })
    }

    #[test]
    fn test_bottom_up_order() {
        let mut recorder = Recorder { names: Vec::new() };
        bottom_up(&mut tree(), &mut recorder);
        assert_eq!(recorder.names, ["path", "group", "graphic"]);
    }

    #[test]
    fn test_top_down_order() {
        let mut recorder = Recorder { names: Vec::new() };
        top_down(&mut tree(), &mut recorder);
        assert_eq!(recorder.names, ["graphic", "group", "path"]);
    }
}
