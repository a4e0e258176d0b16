//! XML to JSON-shaped tree normalization
//!
//! The normalized shape follows the common XML-to-JSON convention:
//!
//! - the document becomes an object with one field per top-level element
//! - attributes and child elements become fields of the element's object
//! - repeated sibling elements with the same name collapse into an array
//! - an element holding only text becomes a scalar; text next to attributes
//!   or children is stored under `content`
//! - an empty element without attributes becomes an empty string
//!
//! Text and attribute values are coerced to booleans, `null` or numbers when
//! they read as such.

use crate::format::ParseError;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Number, Value};

const CONTENT_FIELD: &str = "content";

/// An element whose closing tag has not been seen yet
struct OpenElement {
    name: String,
    fields: Map<String, Value>,
    text: String,
}

impl OpenElement {
    fn new(name: String) -> Self {
        OpenElement {
            name,
            fields: Map::new(),
            text: String::new(),
        }
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, ParseError> {
        let mut element = OpenElement::new(decode_name(start.name().as_ref())?);
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = decode_name(attr.key.as_ref())?;
            let value = attr.unescape_value()?;
            accumulate(&mut element.fields, key, coerce(&value));
        }
        Ok(element)
    }

    fn into_value(self) -> (String, Value) {
        let text = self.text.trim();
        let value = if self.fields.is_empty() {
            if text.is_empty() {
                Value::String(String::new())
            } else {
                coerce(text)
            }
        } else {
            let mut fields = self.fields;
            if !text.is_empty() {
                accumulate(&mut fields, CONTENT_FIELD.to_string(), coerce(text));
            }
            Value::Object(fields)
        };
        (self.name, value)
    }
}

/// Parse an XML document into a tree rooted at an implicit object
pub fn parse_xml(bytes: &[u8]) -> Result<Value, ParseError> {
    let mut reader = Reader::from_reader(bytes);
    let mut open: Vec<OpenElement> = Vec::new();
    let mut root = Map::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                open.push(OpenElement::from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = OpenElement::from_start(&start)?;
                close_element(element, &mut open, &mut root);
            }
            Event::End(end) => {
                let name = decode_name(end.name().as_ref())?;
                let element = match open.pop() {
                    Some(element) if element.name == name => element,
                    Some(element) => {
                        return Err(ParseError::MalformedXml {
                            reason: format!("expected </{}>, found </{}>", element.name, name),
                        })
                    }
                    None => {
                        return Err(ParseError::MalformedXml {
                            reason: format!("unexpected closing tag </{}>", name),
                        })
                    }
                };
                close_element(element, &mut open, &mut root);
            }
            Event::Text(text) => {
                let text = text.decode().map_err(quick_xml::Error::from)?;
                push_text(&mut open, &text)?;
            }
            Event::CData(cdata) => {
                let text = cdata.decode().map_err(quick_xml::Error::from)?;
                push_text(&mut open, &text)?;
            }
            Event::GeneralRef(reference) => {
                if let Some(ch) = reference.resolve_char_ref()? {
                    push_text(&mut open, ch.encode_utf8(&mut [0; 4]))?;
                } else {
                    let name = reference.decode().map_err(quick_xml::Error::from)?;
                    let resolved = resolve_predefined_entity(&name).ok_or_else(|| {
                        ParseError::MalformedXml {
                            reason: format!("unknown entity &{};", name),
                        }
                    })?;
                    push_text(&mut open, resolved)?;
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and DOCTYPE carry no data
            _ => {}
        }
    }

    if let Some(element) = open.last() {
        return Err(ParseError::MalformedXml {
            reason: format!("unclosed element <{}>", element.name),
        });
    }

    Ok(Value::Object(root))
}

fn decode_name(raw: &[u8]) -> Result<String, ParseError> {
    String::from_utf8(raw.to_vec()).map_err(|e| ParseError::MalformedXml {
        reason: format!("invalid UTF-8 in name: {}", e),
    })
}

/// Append text to the innermost open element; only whitespace may appear outside one
fn push_text(open: &mut [OpenElement], text: &str) -> Result<(), ParseError> {
    match open.last_mut() {
        Some(element) => element.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => {
            return Err(ParseError::MalformedXml {
                reason: format!("text outside any element: {:?}", text.trim()),
            })
        }
    }
    Ok(())
}

fn close_element(element: OpenElement, open: &mut [OpenElement], root: &mut Map<String, Value>) {
    let (name, value) = element.into_value();
    let parent = match open.last_mut() {
        Some(parent) => &mut parent.fields,
        None => root,
    };
    accumulate(parent, name, value);
}

/// Insert a field, turning repeated names into an array in document order
fn accumulate(fields: &mut Map<String, Value>, name: String, value: Value) {
    match fields.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            fields.insert(name, value);
        }
    }
}

/// Interpret text as a boolean, null or number when it reads as one
fn coerce(text: &str) -> Value {
    if text.is_empty() {
        return Value::String(String::new());
    }
    if text.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if text.eq_ignore_ascii_case("null") {
        return Value::Null;
    }

    // JSON number grammar: no leading zeros, no leading '+', no surrounding space
    let starts_numeric = text.starts_with(|c: char| c == '-' || c.is_ascii_digit());
    if starts_numeric && text.trim() == text {
        if let Ok(number) = serde_json::from_str::<Number>(text) {
            return Value::Number(number);
        }
    }

    Value::String(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_document() {
        let value = parse_xml(b"<person><name>Alice</name><age>30</age></person>").unwrap();
        assert_eq!(value, json!({"person": {"name": "Alice", "age": 30}}));
    }

    #[test]
    fn test_attributes_become_fields() {
        let value = parse_xml(br#"<user id="7" active="true"><name>Bob</name></user>"#).unwrap();
        assert_eq!(
            value,
            json!({"user": {"id": 7, "active": true, "name": "Bob"}})
        );
    }

    #[test]
    fn test_repeated_elements_become_array() {
        let xml = br#"<?xml version="1.0"?>
            <order>
                <item><sku>A1</sku></item>
                <item><sku>B2</sku></item>
                <item><sku>C3</sku></item>
            </order>"#;

        let value = parse_xml(xml).unwrap();
        assert_eq!(
            value,
            json!({"order": {"item": [{"sku": "A1"}, {"sku": "B2"}, {"sku": "C3"}]}})
        );
    }

    #[test]
    fn test_text_next_to_attributes_is_content() {
        let value = parse_xml(br#"<price currency="EUR">12.5</price>"#).unwrap();
        assert_eq!(value, json!({"price": {"currency": "EUR", "content": 12.5}}));
    }

    #[test]
    fn test_empty_elements() {
        let value = parse_xml(br#"<root><a/><b></b><c flag="on"/></root>"#).unwrap();
        assert_eq!(value, json!({"root": {"a": "", "b": "", "c": {"flag": "on"}}}));
    }

    #[test]
    fn test_multiple_top_level_fields() {
        // Several top-level elements are tolerated and each becomes a root field
        let value = parse_xml(b"<a>1</a><b>2</b>").unwrap();
        assert_eq!(value, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_entities_and_cdata() {
        let value =
            parse_xml(b"<r><t>fish &amp; chips &#65;</t><c><![CDATA[<raw>]]></c></r>").unwrap();
        assert_eq!(value, json!({"r": {"t": "fish & chips A", "c": "<raw>"}}));
    }

    #[test]
    fn test_comments_ignored() {
        let value = parse_xml(b"<!-- header --><r><!-- note --><v>x</v></r>").unwrap();
        assert_eq!(value, json!({"r": {"v": "x"}}));
    }

    #[test]
    fn test_coercion() {
        assert_eq!(coerce("42"), json!(42));
        assert_eq!(coerce("-1.25"), json!(-1.25));
        assert_eq!(coerce("TRUE"), json!(true));
        assert_eq!(coerce("null"), Value::Null);
        assert_eq!(coerce("007"), json!("007"));
        assert_eq!(coerce("+5"), json!("+5"));
        assert_eq!(coerce("12 apples"), json!("12 apples"));
        assert_eq!(coerce("abc"), json!("abc"));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(parse_xml(b"<a><b></a>").is_err());
        assert!(parse_xml(b"<a>").is_err());
        assert!(parse_xml(b"</a>").is_err());
        assert!(parse_xml(b"<a>&bogus;</a>").is_err());
    }

    #[test]
    fn test_text_outside_elements() {
        assert!(matches!(
            parse_xml(b"<a>1</a>trailing"),
            Err(ParseError::MalformedXml { .. })
        ));
        assert!(parse_xml(b"leading<a>1</a>").is_err());
        assert!(parse_xml(b"<a>1</a>&amp;").is_err());

        let value = parse_xml(b"\n  <a>1</a>\n\t").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }
}
