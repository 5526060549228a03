//! XML to JSON conversion
//!
//! Converts an XML document into a `serde_json::Value` tree:
//! - the result is `{ <root name>: <root value> }`
//! - an element without attributes and without child elements becomes its text
//! - any other element becomes an object; attributes live under `"$"`,
//!   non-whitespace text under `"_"`, and children under their element name
//! - a child name seen once maps to the child value, a child name seen more
//!   than once maps to an array of values in document order

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};
use tracing::{debug, instrument, trace};

use crate::error::{Result, TransformError};

/// Key holding an element's attributes
pub const ATTRIBUTES_KEY: &str = "$";

/// Key holding an element's text when it also has attributes or children
pub const TEXT_KEY: &str = "_";

/// Element under construction
#[derive(Debug)]
struct Frame {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = std::str::from_utf8(start.name().as_ref())?.to_string();

        let mut attributes = Map::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = std::str::from_utf8(attribute.key.as_ref())?.to_string();
            let value = attribute.unescape_value()?.into_owned();
            attributes.insert(key, Value::String(value));
        }

        Ok(Self {
            name,
            attributes,
            children: Map::new(),
            text: String::new(),
        })
    }

    /// Add a converted child, promoting the slot to an array on repetition
    fn push_child(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            None => {
                self.children.insert(name, value);
            }
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }

    fn close(self) -> (String, Value) {
        if self.attributes.is_empty() && self.children.is_empty() {
            return (self.name, Value::String(self.text));
        }

        let mut object = Map::new();
        if !self.attributes.is_empty() {
            object.insert(ATTRIBUTES_KEY.to_string(), Value::Object(self.attributes));
        }
        if !self.text.trim().is_empty() {
            object.insert(TEXT_KEY.to_string(), Value::String(self.text));
        }
        object.extend(self.children);

        (self.name, Value::Object(object))
    }
}

/// Document being assembled from reader events
#[derive(Debug, Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    root: Option<(String, Value)>,
}

impl TreeBuilder {
    fn open(&mut self, frame: Frame) -> Result<()> {
        if self.stack.is_empty() {
            if let Some((root_name, _)) = &self.root {
                return Err(TransformError::MultipleRoots(format!(
                    "{} after {}",
                    frame.name, root_name
                )));
            }
        }
        trace!(element = %frame.name, depth = self.stack.len(), "Opening element");
        self.stack.push(frame);
        Ok(())
    }

    fn close(&mut self) {
        // quick-xml rejects end tags that do not match, so the stack is never empty here
        if let Some(frame) = self.stack.pop() {
            let (name, value) = frame.close();
            match self.stack.last_mut() {
                Some(parent) => parent.push_child(name, value),
                None => self.root = Some((name, value)),
            }
        }
    }

    fn text(&mut self, text: &str) -> Result<()> {
        match self.stack.last_mut() {
            Some(frame) => {
                frame.text.push_str(text);
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(TransformError::TextOutsideRoot),
        }
    }

    fn finish(self) -> Result<Value> {
        if let Some(frame) = self.stack.last() {
            return Err(TransformError::UnclosedElement(frame.name.clone()));
        }
        let (name, value) = self.root.ok_or(TransformError::EmptyDocument)?;

        let mut document = Map::new();
        document.insert(name, value);
        Ok(Value::Object(document))
    }
}

/// Convert an XML document into a JSON value tree
#[instrument(skip(xml), fields(len = xml.len()))]
pub fn xml_to_json(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    let mut builder = TreeBuilder::default();

    loop {
        match reader.read_event()? {
            Event::Start(start) => builder.open(Frame::open(&start)?)?,
            Event::Empty(start) => {
                builder.open(Frame::open(&start)?)?;
                builder.close();
            }
            Event::End(_) => builder.close(),
            Event::Text(text) => builder.text(&text.unescape()?)?,
            Event::CData(cdata) => builder.text(std::str::from_utf8(&cdata)?)?,
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes carry no data
            _ => {}
        }
    }

    let document = builder.finish()?;
    debug!("XML document converted");
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_only_elements_become_strings() {
        let value = xml_to_json("<root><a>1</a><b>two</b></root>").unwrap();
        assert_eq!(value, json!({ "root": { "a": "1", "b": "two" } }));
    }

    #[test]
    fn test_repeated_elements_become_arrays_in_order() {
        let value = xml_to_json("<root><row>1</row><row>2</row><row>3</row></root>").unwrap();
        assert_eq!(value, json!({ "root": { "row": ["1", "2", "3"] } }));
    }

    #[test]
    fn test_single_element_stays_scalar() {
        let value = xml_to_json("<root><row><STTN>시청</STTN></row></root>").unwrap();
        assert_eq!(value, json!({ "root": { "row": { "STTN": "시청" } } }));
    }

    #[test]
    fn test_empty_elements_become_empty_strings() {
        let value = xml_to_json("<root><a/><b></b></root>").unwrap();
        assert_eq!(value, json!({ "root": { "a": "", "b": "" } }));
    }

    #[test]
    fn test_attributes_and_mixed_text() {
        let value = xml_to_json(r#"<root><item id="7" kind="x">hello</item></root>"#).unwrap();
        assert_eq!(
            value,
            json!({ "root": { "item": { "$": { "id": "7", "kind": "x" }, "_": "hello" } } })
        );
    }

    #[test]
    fn test_whitespace_between_children_is_dropped() {
        let xml = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<root>\n  <a>1</a>\n  <!-- note -->\n</root>\n";
        let value = xml_to_json(xml).unwrap();
        assert_eq!(value, json!({ "root": { "a": "1" } }));
    }

    #[test]
    fn test_entities_and_cdata_are_text() {
        let value = xml_to_json("<root><a>1 &amp; 2</a><b><![CDATA[<raw>]]></b></root>").unwrap();
        assert_eq!(value, json!({ "root": { "a": "1 & 2", "b": "<raw>" } }));
    }

    #[test]
    fn test_mismatched_end_tag_is_error() {
        assert!(xml_to_json("<root><a>1</b></root>").is_err());
    }

    #[test]
    fn test_unclosed_element_is_error() {
        assert!(xml_to_json("<root><a>1</a>").is_err());
    }

    #[test]
    fn test_empty_document_is_error() {
        assert!(matches!(xml_to_json("   "), Err(TransformError::EmptyDocument)));
    }

    #[test]
    fn test_multiple_roots_is_error() {
        assert!(matches!(
            xml_to_json("<a/><b/>"),
            Err(TransformError::MultipleRoots(_))
        ));
    }

    #[test]
    fn test_plain_text_is_error() {
        assert!(xml_to_json("Service Unavailable").is_err());
    }
}
