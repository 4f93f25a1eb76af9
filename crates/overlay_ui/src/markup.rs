//! Markup reader.
//!
//! Turns an XML document into a small element tree. Only element names,
//! attribute values and text matter to the compiler; comments, declarations
//! and processing instructions are skipped.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{UiError, UiResult};
use crate::node::MAX_NODES;

/// Deepest element nesting `parse` accepts: a full chain of `Node`s plus one
/// hook element under the last.
pub const MAX_DEPTH: usize = MAX_NODES + 1;

/// One element of a markup document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Element name.
    pub name: String,
    /// Attributes in declaration order.
    pub attributes: Vec<(String, String)>,
    /// Concatenated, trimmed text content.
    pub text: String,
    /// Child elements in declaration order.
    pub children: Vec<Element>,
}

impl Element {
    /// Returns the value of an attribute, if declared.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first child element with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Iterates child elements with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Parses an attribute as a float.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidAttribute`] if the value is not a number.
    pub fn float_attribute(&self, name: &str) -> UiResult<Option<f32>> {
        self.attribute(name)
            .map(|raw| raw.trim().parse::<f32>().map_err(|_| self.invalid(name, raw)))
            .transpose()
    }

    /// Parses an attribute as an unsigned 32-bit integer, decimal or `0x` hex.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidAttribute`] if the value is not an integer.
    pub fn uint_attribute(&self, name: &str) -> UiResult<Option<u32>> {
        self.attribute(name)
            .map(|raw| {
                let trimmed = raw.trim();
                let parsed = match trimmed
                    .strip_prefix("0x")
                    .or_else(|| trimmed.strip_prefix("0X"))
                {
                    Some(hex) => u32::from_str_radix(hex, 16),
                    None => trimmed.parse::<u32>(),
                };
                parsed.map_err(|_| self.invalid(name, raw))
            })
            .transpose()
    }

    fn invalid(&self, attribute: &str, value: &str) -> UiError {
        UiError::InvalidAttribute {
            element: self.name.clone(),
            attribute: attribute.to_owned(),
            value: value.to_owned(),
        }
    }
}

/// Reads and parses a markup file.
///
/// # Errors
///
/// Returns [`UiError::Io`] if the file cannot be read and
/// [`UiError::Markup`] if it is not well-formed.
pub fn load(path: &Path) -> UiResult<Vec<Element>> {
    let source = std::fs::read_to_string(path).map_err(|source| UiError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&source)
}

/// Parses a markup document into its top-level elements.
///
/// # Errors
///
/// Returns [`UiError::Markup`] if the document is not well-formed, or
/// [`UiError::TooDeep`] once nesting passes [`MAX_DEPTH`].
pub fn parse(source: &str) -> UiResult<Vec<Element>> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut roots = Vec::new();
    let mut open: Vec<Element> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| UiError::Markup(format!("at byte {}: {e}", reader.buffer_position())))?;

        if matches!(event, Event::Start(_) | Event::Empty(_)) && open.len() >= MAX_DEPTH {
            return Err(UiError::TooDeep { limit: MAX_DEPTH });
        }

        match event {
            Event::Start(ref start) => open.push(element_from(start)?),
            Event::Empty(ref start) => {
                let element = element_from(start)?;
                attach(&mut open, &mut roots, element);
            }
            Event::End(_) => {
                let element = open
                    .pop()
                    .ok_or_else(|| UiError::Markup("closing tag without opening tag".into()))?;
                attach(&mut open, &mut roots, element);
            }
            Event::Text(ref text) => {
                if let Some(current) = open.last_mut() {
                    let text = text
                        .unescape()
                        .map_err(|e| UiError::Markup(format!("bad text: {e}")))?;
                    current.text.push_str(text.trim());
                }
            }
            Event::CData(ref data) => {
                if let Some(current) = open.last_mut() {
                    current.text.push_str(String::from_utf8_lossy(data).trim());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(UiError::Markup(format!("unclosed element <{}>", unclosed.name)));
    }

    Ok(roots)
}

fn element_from(start: &BytesStart<'_>) -> UiResult<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| UiError::Markup(format!("attribute error in <{name}>: {e}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| UiError::Markup(format!("bad value for {name}.{key}: {e}")))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        attributes,
        text: String::new(),
        children: Vec::new(),
    })
}

fn attach(open: &mut [Element], roots: &mut Vec<Element>, element: Element) {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None => roots.push(element),
    }
}
