//! SVG serialization to minified XML.
//!
//! Attributes whose value matches the SVG default are omitted; colors are
//! spelled in their shortest hex form; identity transforms disappear.

use crate::element::{Color, Element, FillRule, LineCap, LineJoin, Path};
use crate::math::Matrix3;
use crate::pathdata::write_path_data;
use crate::printer::{SvgPrinter, format_number};

/// Serialize a graphic tree to a minified SVG string.
pub fn serialize(root: &Element, precision: u8) -> String {
    let mut out = String::new();
    serialize_element(&mut out, root, &SvgPrinter::new(precision));
    out
}

fn serialize_element(out: &mut String, element: &Element, printer: &SvgPrinter) {
    let (name, children) = match element {
        Element::Graphic(e) => {
            open_tag(out, "svg", e.id.as_deref());
            foreign_attrs(out, &e.foreign);
            ("svg", &e.children)
        }
        Element::Group(e) => {
            open_tag(out, "g", e.id.as_deref());
            if !e.transform.is_identity() {
                push_attr(out, "transform", &write_transform(&e.transform, printer));
            }
            foreign_attrs(out, &e.foreign);
            ("g", &e.children)
        }
        Element::ClipPath(e) => {
            open_tag(out, "clipPath", e.id.as_deref());
            foreign_attrs(out, &e.foreign);
            ("clipPath", &e.children)
        }
        Element::Extra(e) => {
            open_tag(out, &e.name, e.id.as_deref());
            foreign_attrs(out, &e.foreign);
            (e.name.as_str(), &e.children)
        }
        Element::Path(path) => {
            open_tag(out, "path", path.id.as_deref());
            path_attrs(out, path, printer);
            foreign_attrs(out, &path.foreign);
            out.push_str("/>");
            return;
        }
        Element::Text(text) => {
            push_escaped_text(out, text.trim());
            return;
        }
        Element::CData(data) => {
            out.push_str("<![CDATA[");
            out.push_str(data);
            out.push_str("]]>");
            return;
        }
    };

    if children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in children {
        serialize_element(out, child, printer);
    }
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn open_tag(out: &mut String, name: &str, id: Option<&str>) {
    out.push('<');
    out.push_str(name);
    if let Some(id) = id {
        push_attr(out, "id", id);
    }
}

fn path_attrs(out: &mut String, path: &Path, printer: &SvgPrinter) {
    if !path.commands.is_empty() {
        push_attr(out, "d", &write_path_data(&path.commands, printer));
    }
    if path.fill != Color::BLACK {
        push_attr(out, "fill", &write_color(path.fill));
    }
    if path.fill_rule == FillRule::EvenOdd {
        push_attr(out, "fill-rule", "evenodd");
    }
    if !path.stroke.is_transparent() {
        push_attr(out, "stroke", &write_color(path.stroke));
        if path.stroke_width != 1.0 {
            push_attr(out, "stroke-width", &format_number(path.stroke_width, printer.precision));
        }
        match path.stroke_line_cap {
            LineCap::Butt => {}
            LineCap::Round => push_attr(out, "stroke-linecap", "round"),
            LineCap::Square => push_attr(out, "stroke-linecap", "square"),
        }
        match path.stroke_line_join {
            LineJoin::Miter => {}
            LineJoin::Round => push_attr(out, "stroke-linejoin", "round"),
            LineJoin::Bevel => push_attr(out, "stroke-linejoin", "bevel"),
        }
        if path.stroke_miter_limit != 4.0 {
            push_attr(
                out,
                "stroke-miterlimit",
                &format_number(path.stroke_miter_limit, printer.precision),
            );
        }
    }
}

fn foreign_attrs(out: &mut String, attrs: &[crate::element::Attribute]) {
    for attr in attrs {
        push_attr(out, &attr.name, &attr.value);
    }
}

fn push_escaped_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    for c in value.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

/// Shortest color spelling: `none`, `#rgb`, `#rrggbb`, or `rgba()` when a
/// partial alpha is present.
fn write_color(color: Color) -> String {
    if color.is_transparent() {
        return "none".into();
    }
    if color.a != 0xff {
        return format!(
            "rgba({},{},{},{})",
            color.r,
            color.g,
            color.b,
            format_number(color.a as f64 / 255.0, 3)
        );
    }
    let collapsible = |c: u8| c >> 4 == (c & 0x0f);
    if collapsible(color.r) && collapsible(color.g) && collapsible(color.b) {
        format!("#{:x}{:x}{:x}", color.r & 0x0f, color.g & 0x0f, color.b & 0x0f)
    } else {
        format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
    }
}

fn write_transform(transform: &Matrix3, printer: &SvgPrinter) -> String {
    let [a, b, c, d, e, f] = transform.to_svg();
    let numbers: Vec<String> = [a, b, c, d, e, f]
        .iter()
        .map(|n| format_number(*n, printer.precision))
        .collect();
    format!("matrix({})", numbers.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, CommandVariant};
    use crate::element::{Attribute, Graphic, Group};
    use crate::math::Point;

    #[test]
    fn test_serialize_minimal_path() {
        let root = Element::Graphic(Graphic {
            foreign: vec![Attribute::new("xmlns", "http://www.w3.org/2000/svg")],
            children: vec![Element::Path(Path::with_commands(vec![
                Command::MoveTo(CommandVariant::Absolute, vec![Point::new(2.0, 2.0)]),
                Command::LineTo(CommandVariant::Relative, vec![Point::new(20.0, 20.0)]),
            ]))],
            ..Graphic::default()
        });
        assert_eq!(
            serialize(&root, 3),
            r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M2 2l20 20"/></svg>"#
        );
    }

    #[test]
    fn test_default_attributes_omitted() {
        let root = Element::Path(Path::default());
        assert_eq!(serialize(&root, 3), "<path/>");
    }

    #[test]
    fn test_colors_shortest_form() {
        assert_eq!(write_color(Color::TRANSPARENT), "none");
        assert_eq!(write_color(Color::opaque(0xff, 0xff, 0xff)), "#fff");
        assert_eq!(write_color(Color::opaque(0x10, 0x20, 0x30)), "#102030");
        assert_eq!(
            write_color(Color {
                a: 0x80,
                r: 0xff,
                g: 0,
                b: 0
            }),
            "rgba(255,0,0,.502)"
        );
    }

    #[test]
    fn test_transform_emitted_as_matrix() {
        let root = Element::Group(Group {
            transform: Matrix3::translate(3.0, 4.0),
            children: vec![Element::Path(Path::default())],
            ..Group::default()
        });
        assert_eq!(
            serialize(&root, 3),
            r#"<g transform="matrix(1 0 0 1 3 4)"><path/></g>"#
        );
    }

    #[test]
    fn test_text_child_escaped() {
        let root = Element::Extra(crate::element::Extra {
            name: "text".into(),
            id: None,
            foreign: vec![Attribute::new("x", "1")],
            children: vec![Element::Text("a < b & c".into())],
        });
        assert_eq!(serialize(&root, 3), r#"<text x="1">a &lt; b &amp; c</text>"#);
    }

    #[test]
    fn test_cdata_emitted_verbatim() {
        let root = Element::Extra(crate::element::Extra {
            name: "style".into(),
            id: None,
            foreign: Vec::new(),
            children: vec![Element::CData(".a{fill:red}".into())],
        });
        assert_eq!(serialize(&root, 3), "<style><![CDATA[.a{fill:red}]]></style>");
    }

    #[test]
    fn test_round_trip_preserves_foreign() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0 0" fill="url(#grad)"/></svg>"#;
        let root = crate::parse::parse_svg(svg).unwrap();
        assert_eq!(serialize(&root, 3), svg);
    }
}
