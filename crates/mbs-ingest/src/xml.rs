//! Generic XML to JSON tree conversion.
//!
//! The conversion is structural only and does no type inference:
//!
//! - an element with neither children nor attributes becomes its trimmed text
//! - otherwise it becomes an object; attributes are stored under `-name`,
//!   children under their element name, and text under `#content`
//! - repeated child names collapse into an array in document order
//!
//! The document itself becomes `{ "<root>": <root value> }`.

use std::fmt;
use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::error::{IngestError, Result};

/// Key prefix for attributes.
pub const ATTRIBUTE_PREFIX: &str = "-";

/// Key for text that sits next to child elements or attributes.
pub const CONTENT_KEY: &str = "#content";

/// Convert an XML byte buffer into a JSON tree.
pub fn xml_to_json(xml: &[u8]) -> Result<Value> {
    read_xml_tree(xml)
}

/// Convert XML from any buffered reader into a JSON tree.
pub fn read_xml_tree<R: BufRead>(source: R) -> Result<Value> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|err| xml_error(reader.error_position(), err))?;
        let position = reader.buffer_position();

        match event {
            Event::Start(start) => stack.push(XmlNode::open(&start, position)?),
            Event::Empty(start) => {
                let node = XmlNode::open(&start, position)?;
                close_node(node, &mut stack, &mut root);
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| xml_error(position, "closing tag without an open element"))?;
                close_node(node, &mut stack, &mut root);
            }
            Event::Text(text) => {
                if let Some(node) = stack.last_mut() {
                    let decoded = text.decode().map_err(|err| xml_error(position, err))?;
                    node.text.push_str(&decoded);
                }
            }
            Event::CData(data) => {
                if let Some(node) = stack.last_mut() {
                    let decoded = data.decode().map_err(|err| xml_error(position, err))?;
                    node.text.push_str(&decoded);
                }
            }
            Event::GeneralRef(reference) => {
                if let Some(node) = stack.last_mut() {
                    if let Some(ch) = reference
                        .resolve_char_ref()
                        .map_err(|err| xml_error(position, err))?
                    {
                        node.text.push(ch);
                    } else {
                        let name = reference.decode().map_err(|err| xml_error(position, err))?;
                        let resolved = resolve_predefined_entity(&name).ok_or_else(|| {
                            xml_error(position, format_args!("unknown entity &{name};"))
                        })?;
                        node.text.push_str(resolved);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(xml_error(
            reader.buffer_position(),
            format_args!("unclosed element <{}>", open.name),
        ));
    }

    let (name, value) = root.ok_or(IngestError::EmptyDocument)?;
    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}

/// An element being assembled while its content is read.
struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<(String, Value)>,
    text: String,
}

impl XmlNode {
    fn open(start: &BytesStart<'_>, position: u64) -> Result<Self> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|err| xml_error(position, err))?;
            let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(|err| xml_error(position, err))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    fn into_entry(self) -> (String, Value) {
        let text = self.text.trim();
        if self.attributes.is_empty() && self.children.is_empty() {
            return (self.name, Value::String(text.to_string()));
        }

        let mut object = Map::new();
        for (key, value) in self.attributes {
            object.insert(format!("{ATTRIBUTE_PREFIX}{key}"), Value::String(value));
        }
        for (child, value) in self.children {
            match object.entry(child) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(mut slot) => match slot.get_mut() {
                    Value::Array(items) => items.push(value),
                    existing => {
                        let first = existing.take();
                        *existing = Value::Array(vec![first, value]);
                    }
                },
            }
        }
        if !text.is_empty() {
            object.insert(CONTENT_KEY.to_string(), Value::String(text.to_string()));
        }
        (self.name, Value::Object(object))
    }
}

fn close_node(node: XmlNode, stack: &mut [XmlNode], root: &mut Option<(String, Value)>) {
    let entry = node.into_entry();
    match stack.last_mut() {
        Some(parent) => parent.children.push(entry),
        None => {
            // Content after the first root element is not well-formed XML; keep the first.
            if root.is_none() {
                *root = Some(entry);
            }
        }
    }
}

fn xml_error(position: u64, message: impl fmt::Display) -> IngestError {
    IngestError::XmlParse {
        position,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leaf_elements_become_strings() {
        let tree = xml_to_json(b"<Root><A>1</A><B/><C>  spaced  </C></Root>").unwrap();
        assert_eq!(tree, json!({"Root": {"A": "1", "B": "", "C": "spaced"}}));
    }

    #[test]
    fn test_repeated_children_become_arrays() {
        let xml = b"<Root><Item>a</Item><Other>x</Other><Item>b</Item><Item>c</Item></Root>";
        let tree = xml_to_json(xml).unwrap();
        assert_eq!(
            tree,
            json!({"Root": {"Item": ["a", "b", "c"], "Other": "x"}})
        );
    }

    #[test]
    fn test_attributes_and_content() {
        let xml = br#"<Root version="2"><Fee currency="AUD">12.50</Fee></Root>"#;
        let tree = xml_to_json(xml).unwrap();
        assert_eq!(
            tree,
            json!({"Root": {"-version": "2", "Fee": {"-currency": "AUD", "#content": "12.50"}}})
        );
    }

    #[test]
    fn test_entities_are_resolved() {
        let tree = xml_to_json(b"<Root><D>Ear &amp; nose &#65;</D></Root>").unwrap();
        assert_eq!(tree, json!({"Root": {"D": "Ear & nose A"}}));
    }

    #[test]
    fn test_cdata_is_text() {
        let tree = xml_to_json(b"<Root><D><![CDATA[<b>bold</b>]]></D></Root>").unwrap();
        assert_eq!(tree, json!({"Root": {"D": "<b>bold</b>"}}));
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(
            xml_to_json(b"<Root><A>1</B></Root>"),
            Err(IngestError::XmlParse { .. })
        ));
        assert!(matches!(
            xml_to_json(b"<Root><A>1</A>"),
            Err(IngestError::XmlParse { .. })
        ));
        assert!(matches!(xml_to_json(b""), Err(IngestError::EmptyDocument)));
    }
}
