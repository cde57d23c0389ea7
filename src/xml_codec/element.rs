use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};

/// An owned XML element: name, attributes in document order, accumulated
/// text content, and child elements.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Depth-first search for the first element with the given name,
    /// starting at (and including) this element.
    pub fn find_first(&self, name: &str) -> Option<&Element> {
        if self.name == name {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_first(name))
    }

    /// Direct children with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn first_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }
}

/// Parse a document into its root element. Any well-formedness failure is a
/// malformed document as far as callers are concerned.
pub fn parse(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::MalformedDocument(format!("invalid xml: {}", e)))?;

        match event {
            Event::Start(start) => stack.push(element_from_start(&start)?),
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::End(_) => {
                let element = match stack.pop() {
                    Some(element) => element,
                    None => {
                        return Err(Error::MalformedDocument(
                            "unbalanced closing tag".to_string(),
                        ))
                    }
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::Text(text) => {
                if let Some(parent) = stack.last_mut() {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| Error::MalformedDocument(format!("invalid text: {}", e)))?;
                    parent.text.push_str(&unescaped);
                }
            }
            Event::CData(cdata) => {
                if let Some(parent) = stack.last_mut() {
                    parent
                        .text
                        .push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                }
            }
            Event::Eof => {
                return Err(Error::MalformedDocument("no root element".to_string()));
            }
            _ => {}
        }
    }
}

fn element_from_start(start: &BytesStart) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| {
            Error::MalformedDocument(format!("invalid attribute in <{}>: {}", name, e))
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| {
                Error::MalformedDocument(format!("invalid attribute value in <{}>: {}", name, e))
            })?
            .into_owned();
        attrs.push((key, value));
    }

    Ok(Element {
        name,
        attrs,
        text: String::new(),
        children: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let root = parse(r#"<a x="1"><b>hi</b><b>there</b><c/></a>"#).unwrap();
        assert_eq!(root.name, "a");
        assert_eq!(root.attr("x"), Some("1"));
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.children_named("b").count(), 2);
        assert_eq!(root.first_child("b").unwrap().text, "hi");
    }

    #[test]
    fn test_find_first_is_depth_first() {
        let root = parse("<a><b><target>deep</target></b><target>shallow</target></a>").unwrap();
        assert_eq!(root.find_first("target").unwrap().text, "deep");
    }

    #[test]
    fn test_parse_unescapes_entities() {
        let root = parse("<a t=\"x &amp; y\">1 &lt; 2</a>").unwrap();
        assert_eq!(root.attr("t"), Some("x & y"));
        assert_eq!(root.text, "1 < 2");
    }

    #[test]
    fn test_parse_rejects_broken_xml() {
        assert!(parse("<a><b></a>").is_err());
        assert!(parse("").is_err());
    }
}
