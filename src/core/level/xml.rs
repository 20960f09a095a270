//=========================================================================
// XML Element Tree
//=========================================================================
//
// Minimal owned element tree over quick-xml's pull parser, with typed
// attribute accessors that report which element and attribute failed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::str::FromStr;

use glam::Vec2;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

//=== Internal Dependencies ===============================================

use super::error::{LevelError, Result};
use crate::core::draw::Color;

//=== Element =============================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub(super) struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    //--- Parsing ----------------------------------------------------------

    /// Parses a whole document and returns its root element.
    pub fn parse_document(xml: &str) -> Result<Element> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => open.push(Self::from_start(&start)?),
                Event::Empty(start) => {
                    let element = Self::from_start(&start)?;
                    Self::attach(&mut open, &mut root, element);
                }
                Event::Text(text) => {
                    if let Some(current) = open.last_mut() {
                        current.text.push_str(&text.unescape()?);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = open.last_mut() {
                        current.text.push_str(&String::from_utf8(data.into_inner().into_owned())?);
                    }
                }
                Event::End(_) => {
                    if let Some(element) = open.pop() {
                        Self::attach(&mut open, &mut root, element);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(unclosed) = open.pop() {
            return Err(LevelError::Truncated(unclosed.name));
        }
        root.ok_or(LevelError::MissingElement {
            parent: "document".to_owned(),
            element: "root",
        })
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Element> {
        let mut element = Element {
            name: String::from_utf8(start.name().as_ref().to_vec())?,
            ..Element::default()
        };

        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8(attribute.key.as_ref().to_vec())?;
            let value = attribute.unescape_value()?.into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    fn attach(open: &mut [Element], root: &mut Option<Element>, element: Element) {
        match open.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_none() => *root = Some(element),
            None => {}
        }
    }

    //--- Navigation -------------------------------------------------------

    /// The first child called `name`.
    pub fn child(&self, name: &'static str) -> Result<&Element> {
        self.children
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| LevelError::MissingElement {
                parent: self.name.clone(),
                element: name,
            })
    }

    pub fn optional_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    //--- Attributes -------------------------------------------------------

    pub fn attr(&self, name: &'static str) -> Result<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .ok_or_else(|| LevelError::MissingAttribute {
                element: self.name.clone(),
                attribute: name,
            })
    }

    pub fn parse_attr<T: FromStr>(&self, name: &'static str) -> Result<T> {
        let value = self.attr(name)?;
        value.trim().parse().map_err(|_| self.invalid(name, value))
    }

    /// Comma-separated list of exactly `N` values.
    pub fn parse_list<T: FromStr + Copy + Default, const N: usize>(&self, name: &'static str) -> Result<[T; N]> {
        let value = self.attr(name)?;
        let mut out = [T::default(); N];
        let mut parts = value.split(',');

        for slot in out.iter_mut() {
            *slot = parts
                .next()
                .and_then(|part| part.trim().parse().ok())
                .ok_or_else(|| self.invalid(name, value))?;
        }
        if parts.next().is_some() {
            return Err(self.invalid(name, value));
        }
        Ok(out)
    }

    /// `"X,Y"`.
    pub fn parse_vec2(&self, name: &'static str) -> Result<Vec2> {
        let [x, y] = self.parse_list::<f32, 2>(name)?;
        Ok(Vec2::new(x, y))
    }

    /// `"A,R,G,B"`.
    pub fn parse_argb(&self, name: &'static str) -> Result<Color> {
        let [a, r, g, b] = self.parse_list::<u8, 4>(name)?;
        Ok(Color::argb(a, r, g, b))
    }

    pub fn invalid(&self, attribute: &'static str, value: &str) -> LevelError {
        LevelError::InvalidValue {
            element: self.name.clone(),
            attribute,
            value: value.to_owned(),
        }
    }
}

//=== Formatting Helpers ==================================================

pub(super) fn format_vec2(value: Vec2) -> String {
    format!("{},{}", value.x, value.y)
}

pub(super) fn format_argb(color: Color) -> String {
    format!("{},{},{},{}", color.a, color.r, color.g, color.b)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_tree_with_text() {
        let root = Element::parse_document(
            r#"<?xml version="1.0"?>
            <Root A="1"><List><Item N="x"/><Item N="y &amp; z"/></List><Body> 1,2 </Body></Root>"#,
        )
        .unwrap();

        assert_eq!(root.name, "Root");
        assert_eq!(root.attr("A").unwrap(), "1");
        let names: Vec<_> = root
            .child("List")
            .unwrap()
            .children_named("Item")
            .map(|i| i.attr("N").unwrap())
            .collect();
        assert_eq!(names, vec!["x", "y & z"]);
        assert_eq!(root.child("Body").unwrap().text, "1,2");
    }

    #[test]
    fn missing_pieces_name_their_element() {
        let root = Element::parse_document("<Root/>").unwrap();

        assert!(matches!(
            root.child("List"),
            Err(LevelError::MissingElement { ref parent, element: "List" }) if parent == "Root"
        ));
        assert!(matches!(
            root.attr("Name"),
            Err(LevelError::MissingAttribute { attribute: "Name", .. })
        ));
    }

    #[test]
    fn typed_attributes() {
        let root = Element::parse_document(r#"<E W="16" P="1.5, -2" C="255,1,2,3" Bad="1,2,3"/>"#).unwrap();

        assert_eq!(root.parse_attr::<u32>("W").unwrap(), 16);
        assert_eq!(root.parse_vec2("P").unwrap(), Vec2::new(1.5, -2.0));
        assert_eq!(root.parse_argb("C").unwrap(), Color::rgba(1, 2, 3, 255));
        assert!(matches!(root.parse_vec2("Bad"), Err(LevelError::InvalidValue { .. })));
        assert!(matches!(root.parse_argb("Bad"), Err(LevelError::InvalidValue { .. })));
        assert!(matches!(root.parse_attr::<u32>("P"), Err(LevelError::InvalidValue { .. })));
    }

    #[test]
    fn unclosed_or_mismatched_documents_fail() {
        assert!(Element::parse_document("<Root><List>").is_err());
        assert!(Element::parse_document("<Root></List>").is_err());
        assert!(Element::parse_document("").is_err());
    }

    #[test]
    fn formatting_round_trips_through_parsing() {
        let color = Color::argb(10, 20, 30, 40);
        let text = format!(r#"<E C="{}" V="{}"/>"#, format_argb(color), format_vec2(Vec2::new(0.1, 3.0)));
        let root = Element::parse_document(&text).unwrap();

        assert_eq!(root.parse_argb("C").unwrap(), color);
        assert_eq!(root.parse_vec2("V").unwrap(), Vec2::new(0.1, 3.0));
    }
}
