//! Style classes.
//!
//! A class is a flat, named bag of layout and visual attributes. Nodes refer
//! to classes by index; there is no cascade and no inheritance.

use overlay_core::{fnv1a_32, FixedArray};
use tracing::debug;

use crate::error::{UiError, UiResult};
use crate::markup::Element;

/// Maximum number of classes in one style document.
pub const MAX_CLASSES: usize = 256;

/// Fixed-capacity class storage.
pub type ClassArray = FixedArray<Class, MAX_CLASSES>;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from hex value (0xRRGGBBAA).
    #[must_use]
    pub fn hex(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Self::rgba(r, g, b, a)
    }

    /// Creates a color from the packed value stored in style markup.
    ///
    /// Markup stores the bytes in reverse order; they are swapped before
    /// being read as 0xRRGGBBAA.
    #[must_use]
    pub fn from_markup(packed: u32) -> Self {
        Self::hex(packed.swap_bytes())
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Size as fractions of the parent box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    /// Fraction of the parent width.
    pub width: f32,
    /// Fraction of the parent height.
    pub height: f32,
}

/// Offset as fractions of the parent box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    /// Fraction of the parent width from its left edge.
    pub left: f32,
    /// Fraction of the parent height from its top edge.
    pub top: f32,
}

/// Background visuals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Background {
    /// Fill color.
    pub colour: Option<Color>,
    /// Edge stroke color.
    pub border: Option<Color>,
    /// Image path. Accepted but not painted yet.
    pub image: Option<String>,
}

/// A named style class. Absent attributes stay `None`, distinct from zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Class {
    /// Hash of the declared name.
    pub name_hash: u32,
    /// Relative size.
    pub size: Option<Size>,
    /// Relative offset.
    pub offset: Option<Offset>,
    /// Background visuals.
    pub background: Option<Background>,
}

/// Index of a class in the class array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(pub u8);

impl ClassId {
    /// Returns the array index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Looks up a class by name. The empty name never matches.
#[must_use]
pub fn find_class(classes: &ClassArray, name: &str) -> Option<ClassId> {
    if name.is_empty() {
        return None;
    }
    let hash = fnv1a_32(name);
    classes
        .iter()
        .position(|class| class.name_hash == hash)
        .map(|index| ClassId(index as u8))
}

/// Compiles style markup into `classes`, which must be empty.
///
/// Accepts `Class` elements at the top level, or as children of a single
/// wrapping root element.
///
/// # Errors
///
/// Returns [`UiError::ClassCapacity`] when more than [`MAX_CLASSES`] distinct
/// names are declared, or [`UiError::InvalidAttribute`] for non-numeric values.
pub fn compile_classes(document: &[Element], classes: &mut ClassArray) -> UiResult<()> {
    let declarations: Vec<&Element> = match document {
        [wrapper] if wrapper.name != "Class" => wrapper.children_named("Class").collect(),
        _ => document.iter().filter(|e| e.name == "Class").collect(),
    };

    for declaration in declarations {
        let name = declaration.attribute("Name").unwrap_or_default();
        if name.is_empty() {
            debug!("class without a name skipped");
            continue;
        }
        let parsed = parse_class(declaration)?;

        match find_class(classes, name) {
            Some(existing) => merge(&mut classes[existing.index()], parsed),
            None => {
                classes
                    .add(parsed)
                    .map_err(|e| UiError::ClassCapacity(e.capacity))?;
            }
        }
    }

    debug!(classes = classes.len(), "compiled style classes");
    Ok(())
}

fn parse_class(declaration: &Element) -> UiResult<Class> {
    let name = declaration.attribute("Name").unwrap_or_default();
    let mut class = Class {
        name_hash: fnv1a_32(name),
        ..Class::default()
    };

    if let Some(size) = declaration.child("Size") {
        class.size = Some(Size {
            width: size.float_attribute("Width")?.unwrap_or(0.0) / 100.0,
            height: size.float_attribute("Height")?.unwrap_or(0.0) / 100.0,
        });
    }

    if let Some(offset) = declaration
        .child("Offset")
        .or_else(|| declaration.child("Offsets"))
    {
        class.offset = Some(Offset {
            left: offset.float_attribute("Left")?.unwrap_or(0.0) / 100.0,
            top: offset.float_attribute("Top")?.unwrap_or(0.0) / 100.0,
        });
    }

    if let Some(background) = declaration.child("Background") {
        class.background = Some(Background {
            colour: background.uint_attribute("Colour")?.map(Color::from_markup),
            border: background.uint_attribute("Border")?.map(Color::from_markup),
            image: background.attribute("Image").map(str::to_owned),
        });
    }

    Ok(class)
}

fn merge(existing: &mut Class, redeclared: Class) {
    if redeclared.size.is_some() {
        existing.size = redeclared.size;
    }
    if redeclared.offset.is_some() {
        existing.offset = redeclared.offset;
    }
    if redeclared.background.is_some() {
        existing.background = redeclared.background;
    }
}
