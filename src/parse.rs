//! SVG parsing from XML into the element tree.
//!
//! Only the elements and attributes the optimizer understands are
//! interpreted; everything else rides along as foreign attributes or `Extra`
//! elements and is re-emitted verbatim by the writer.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::element::{
    Attribute, ClipPath, Color, Element, FillRule, Graphic, Group, LineCap, LineJoin, Path,
};
use crate::error::WhittleError;
use crate::math::Matrix3;
use crate::pathdata::parse_path_data;

/// Parse an SVG string into a Graphic tree.
pub fn parse_svg(svg: &str) -> Result<Element, WhittleError> {
    let mut reader = Reader::from_str(svg);

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let mut element = parse_element_start(&start)?;
                parse_children(&mut reader, &mut element)?;
                return Ok(element);
            }
            Event::Empty(start) => return parse_element_start(&start),
            Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::Text(_)
            | Event::PI(_) => {
                // Skip prolog noise before the root element.
            }
            Event::Eof => {
                return Err(WhittleError::InvalidDocument("no root element".into()));
            }
            _ => {}
        }
    }
}

fn parse_children(reader: &mut Reader<&[u8]>, parent: &mut Element) -> Result<(), WhittleError> {
    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let mut child = parse_element_start(&start)?;
                parse_children(reader, &mut child)?;
                push_child(parent, child);
            }
            Event::Empty(start) => {
                push_child(parent, parse_element_start(&start)?);
            }
            Event::End(_) => return Ok(()),
            Event::Text(text) => {
                let text = text.unescape()?;
                // Whitespace between elements is formatting, not content.
                if !text.trim().is_empty() {
                    push_child(parent, Element::Text(text.into_owned()));
                }
            }
            Event::CData(cdata) => {
                push_child(
                    parent,
                    Element::CData(String::from_utf8_lossy(&cdata).into_owned()),
                );
            }
            Event::Eof => {
                return Err(WhittleError::InvalidDocument("unexpected end of file".into()));
            }
            // Comments and PIs carry nothing renderable.
            _ => {}
        }
    }
}

fn push_child(parent: &mut Element, child: Element) {
    if let Some(children) = parent.children_mut() {
        children.push(child);
    }
}

fn parse_element_start(start: &BytesStart) -> Result<Element, WhittleError> {
    let name_bytes = start.name();
    let name = std::str::from_utf8(name_bytes.as_ref())?.to_string();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr =
            attr.map_err(|e| WhittleError::InvalidDocument(format!("invalid attribute: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.unescape_value()?.into_owned();
        attributes.push(Attribute::new(key, value));
    }

    match name.as_str() {
        "svg" => Ok(Element::Graphic(parse_graphic(attributes))),
        "g" => Ok(Element::Group(parse_group(attributes)?)),
        "path" => Ok(Element::Path(parse_path(attributes)?)),
        "clipPath" => Ok(Element::ClipPath(parse_clip_path(attributes))),
        _ => Ok(Element::Extra(parse_extra(name, attributes))),
    }
}

fn parse_graphic(attributes: Vec<Attribute>) -> Graphic {
    let mut graphic = Graphic::default();
    for attr in attributes {
        match attr.name.as_str() {
            "id" => graphic.id = Some(attr.value),
            _ => graphic.foreign.push(attr),
        }
    }
    graphic
}

fn parse_group(attributes: Vec<Attribute>) -> Result<Group, WhittleError> {
    let mut group = Group::default();
    for attr in attributes {
        match attr.name.as_str() {
            "id" => group.id = Some(attr.value),
            "transform" => group.transform = parse_transform(&attr.value)?,
            _ => group.foreign.push(attr),
        }
    }
    Ok(group)
}

fn parse_clip_path(attributes: Vec<Attribute>) -> ClipPath {
    let mut clip = ClipPath::default();
    for attr in attributes {
        match attr.name.as_str() {
            "id" => clip.id = Some(attr.value),
            _ => clip.foreign.push(attr),
        }
    }
    clip
}

fn parse_extra(name: String, attributes: Vec<Attribute>) -> crate::element::Extra {
    let mut id = None;
    let mut foreign = Vec::new();
    for attr in attributes {
        if attr.name == "id" {
            id = Some(attr.value);
        } else {
            foreign.push(attr);
        }
    }
    crate::element::Extra {
        name,
        id,
        foreign,
        children: Vec::new(),
    }
}

fn parse_path(attributes: Vec<Attribute>) -> Result<Path, WhittleError> {
    let mut path = Path::default();
    for attr in attributes {
        match attr.name.as_str() {
            "id" => path.id = Some(attr.value),
            "d" => path.commands = parse_path_data(&attr.value)?,
            "fill" => match parse_color(&attr.value) {
                Some(color) => path.fill = color,
                None => path.foreign.push(attr),
            },
            "stroke" => match parse_color(&attr.value) {
                Some(color) => path.stroke = color,
                None => path.foreign.push(attr),
            },
            "fill-rule" => match attr.value.as_str() {
                "nonzero" => path.fill_rule = FillRule::NonZero,
                "evenodd" => path.fill_rule = FillRule::EvenOdd,
                _ => path.foreign.push(attr),
            },
            "stroke-width" => match attr.value.parse() {
                Ok(width) => path.stroke_width = width,
                Err(_) => path.foreign.push(attr),
            },
            "stroke-linecap" => match attr.value.as_str() {
                "butt" => path.stroke_line_cap = LineCap::Butt,
                "round" => path.stroke_line_cap = LineCap::Round,
                "square" => path.stroke_line_cap = LineCap::Square,
                _ => path.foreign.push(attr),
            },
            "stroke-linejoin" => match attr.value.as_str() {
                "miter" => path.stroke_line_join = LineJoin::Miter,
                "round" => path.stroke_line_join = LineJoin::Round,
                "bevel" => path.stroke_line_join = LineJoin::Bevel,
                _ => path.foreign.push(attr),
            },
            "stroke-miterlimit" => match attr.value.parse() {
                Ok(limit) => path.stroke_miter_limit = limit,
                Err(_) => path.foreign.push(attr),
            },
            _ => path.foreign.push(attr),
        }
    }
    Ok(path)
}

/// Parse a paint value. Paints the optimizer cannot model (gradients,
/// references, named colors) return `None` and stay foreign.
fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("transparent") {
        return Some(Color::TRANSPARENT);
    }
    let hex = value.strip_prefix('#')?;
    let nibble = |c: u8| char::from(c).to_digit(16).map(|d| d as u8);
    let byte = |pair: &[u8]| Some(nibble(pair[0])? * 16 + nibble(pair[1])?);
    let bytes = hex.as_bytes();
    match bytes.len() {
        3 => Some(Color::opaque(
            nibble(bytes[0])? * 17,
            nibble(bytes[1])? * 17,
            nibble(bytes[2])? * 17,
        )),
        6 => Some(Color::opaque(
            byte(&bytes[0..2])?,
            byte(&bytes[2..4])?,
            byte(&bytes[4..6])?,
        )),
        8 => Some(Color {
            a: byte(&bytes[0..2])?,
            r: byte(&bytes[2..4])?,
            g: byte(&bytes[4..6])?,
            b: byte(&bytes[6..8])?,
        }),
        _ => None,
    }
}

/// Parse an SVG transform list, composing left to right.
pub fn parse_transform(value: &str) -> Result<Matrix3, WhittleError> {
    let invalid = || WhittleError::InvalidTransform(value.to_string());

    let mut matrix = Matrix3::IDENTITY;
    let mut rest = value.trim();
    while !rest.is_empty() {
        let open = rest.find('(').ok_or_else(invalid)?;
        let close = rest.find(')').ok_or_else(invalid)?;
        if close < open {
            return Err(invalid());
        }
        let name = rest[..open].trim();
        let args: Vec<f64> = rest[open + 1..close]
            .split([',', ' ', '\t', '\n'])
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f64>().map_err(|_| invalid()))
            .collect::<Result<_, _>>()?;

        let step = match (name, args.as_slice()) {
            ("matrix", [a, b, c, d, e, f]) => Matrix3::from_svg(*a, *b, *c, *d, *e, *f),
            ("translate", [tx]) => Matrix3::translate(*tx, 0.0),
            ("translate", [tx, ty]) => Matrix3::translate(*tx, *ty),
            ("scale", [s]) => Matrix3::scale(*s, *s),
            ("scale", [sx, sy]) => Matrix3::scale(*sx, *sy),
            ("rotate", [degrees]) => Matrix3::rotate(degrees.to_radians()),
            ("rotate", [degrees, cx, cy]) => {
                Matrix3::translate(*cx, *cy)
                    * Matrix3::rotate(degrees.to_radians())
                    * Matrix3::translate(-cx, -cy)
            }
            ("skewX", [degrees]) => {
                Matrix3::from_svg(1.0, 0.0, degrees.to_radians().tan(), 1.0, 0.0, 0.0)
            }
            ("skewY", [degrees]) => {
                Matrix3::from_svg(1.0, degrees.to_radians().tan(), 0.0, 1.0, 0.0, 0.0)
            }
            _ => return Err(invalid()),
        };
        matrix = matrix * step;
        rest = rest[close + 1..].trim_start_matches([',', ' ', '\t', '\n']);
    }
    Ok(matrix)
}
