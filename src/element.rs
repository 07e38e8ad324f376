//! The element tree that optimization passes rewrite in place.
//!
//! Readers build this tree, the pipeline mutates it, writers consume it.
//! Foreign attributes are opaque key/value pairs the optimizer does not
//! interpret; they are preserved verbatim, in order, for round-tripping.

use crate::command::Command;
use crate::math::Matrix3;

/// An uninterpreted attribute carried through optimization untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An ARGB color. Paint attributes are format-agnostic values here; writers
/// decide how to spell them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color {
        a: 0,
        r: 0,
        g: 0,
        b: 0,
    };
    pub const BLACK: Color = Color {
        a: 0xff,
        r: 0,
        g: 0,
        b: 0,
    };

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { a: 0xff, r, g, b }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// A node in the graphic tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Graphic(Graphic),
    Group(Group),
    Path(Path),
    ClipPath(ClipPath),
    Extra(Extra),
    /// Character data inside an element the optimizer does not interpret,
    /// e.g. the content of `<text>`. Preserved for round-tripping.
    Text(String),
    /// A CDATA section, e.g. CSS inside `<style>`. Emitted verbatim.
    CData(String),
}

/// The root of a graphic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Graphic {
    pub id: Option<String>,
    pub foreign: Vec<Attribute>,
    pub children: Vec<Element>,
}

/// A container carrying an affine transform over its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: Option<String>,
    pub foreign: Vec<Attribute>,
    pub transform: Matrix3,
    pub children: Vec<Element>,
}

impl Default for Group {
    fn default() -> Self {
        Self {
            id: None,
            foreign: Vec::new(),
            transform: Matrix3::IDENTITY,
            children: Vec::new(),
        }
    }
}

impl Group {
    /// No id, identity transform, no foreign attributes: nothing about this
    /// group matters beyond the children it holds.
    pub fn is_unmarked(&self) -> bool {
        self.id.is_none() && self.foreign.is_empty() && self.transform.is_identity()
    }
}

/// A clipping container. Clip semantics require the container itself, so
/// structural passes never flatten it away.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClipPath {
    pub id: Option<String>,
    pub foreign: Vec<Attribute>,
    pub children: Vec<Element>,
}

/// An element the optimizer does not understand, preserved verbatim along
/// with its subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Extra {
    pub name: String,
    pub id: Option<String>,
    pub foreign: Vec<Attribute>,
    pub children: Vec<Element>,
}

/// A drawable path: commands plus visual attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub id: Option<String>,
    pub foreign: Vec<Attribute>,
    pub commands: Vec<Command>,
    pub fill: Color,
    pub fill_rule: FillRule,
    pub stroke: Color,
    pub stroke_width: f64,
    pub stroke_line_cap: LineCap,
    pub stroke_line_join: LineJoin,
    pub stroke_miter_limit: f64,
}

impl Default for Path {
    fn default() -> Self {
        Self {
            id: None,
            foreign: Vec::new(),
            commands: Vec::new(),
            fill: Color::BLACK,
            fill_rule: FillRule::NonZero,
            stroke: Color::TRANSPARENT,
            stroke_width: 1.0,
            stroke_line_cap: LineCap::Butt,
            stroke_line_join: LineJoin::Miter,
            stroke_miter_limit: 4.0,
        }
    }
}

impl Path {
    pub fn with_commands(commands: Vec<Command>) -> Self {
        Self {
            commands,
            ..Path::default()
        }
    }

    /// True when merging `other`'s commands into this path could not change
    /// how either path renders: every rendering-affecting attribute matches.
    pub fn style_eq(&self, other: &Path) -> bool {
        self.id == other.id
            && self.foreign == other.foreign
            && self.fill == other.fill
            && self.fill_rule == other.fill_rule
            && self.stroke == other.stroke
            && self.stroke_width == other.stroke_width
            && self.stroke_line_cap == other.stroke_line_cap
            && self.stroke_line_join == other.stroke_line_join
            && self.stroke_miter_limit == other.stroke_miter_limit
    }
}

impl Element {
    pub fn id(&self) -> Option<&str> {
        match self {
            Element::Graphic(e) => e.id.as_deref(),
            Element::Group(e) => e.id.as_deref(),
            Element::Path(e) => e.id.as_deref(),
            Element::ClipPath(e) => e.id.as_deref(),
            Element::Extra(e) => e.id.as_deref(),
            Element::Text(_) | Element::CData(_) => None,
        }
    }

    /// The child list, for container elements.
    pub fn children(&self) -> Option<&Vec<Element>> {
        match self {
            Element::Graphic(e) => Some(&e.children),
            Element::Group(e) => Some(&e.children),
            Element::ClipPath(e) => Some(&e.children),
            Element::Extra(e) => Some(&e.children),
            Element::Path(_) | Element::Text(_) | Element::CData(_) => None,
        }
    }

    /// The child list mutably, for container elements.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Element>> {
        match self {
            Element::Graphic(e) => Some(&mut e.children),
            Element::Group(e) => Some(&mut e.children),
            Element::ClipPath(e) => Some(&mut e.children),
            Element::Extra(e) => Some(&mut e.children),
            Element::Path(_) | Element::Text(_) | Element::CData(_) => None,
        }
    }

    pub fn is_path(&self) -> bool {
        matches!(self, Element::Path(_))
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Element::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_path_mut(&mut self) -> Option<&mut Path> {
        match self {
            Element::Path(p) => Some(p),
            _ => None,
        }
    }
}
