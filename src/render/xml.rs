//! XML output format using quick-xml.
//!
//! Document shape:
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <passengers>
//!   <passenger>
//!     <name>..</name>
//!     <age>..</age>        (only when projected)
//!     <ticket>..</ticket>
//!   </passenger>
//! </passengers>
//! ```
//! Leaf elements whose text would be empty are left out. Sentinel
//! strings are ordinary text and always written.

use std::string::FromUtf8Error;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value;
use thiserror::Error;

use crate::passenger::Projection;

pub const ROOT_ELEMENT: &str = "passengers";
pub const ITEM_ELEMENT: &str = "passenger";

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("Failed to write XML: {0}")]
    Write(String),

    #[error("XML output is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Serialize projections into a complete XML document.
pub fn serialize(projections: &[Projection]) -> Result<String, SerializeError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    emit(&mut writer, Event::Start(BytesStart::new(ROOT_ELEMENT)))?;

    for projection in projections {
        emit(&mut writer, Event::Start(BytesStart::new(ITEM_ELEMENT)))?;
        for (key, value) in projection.fields() {
            let text = scalar_text(value);
            if text.is_empty() {
                continue;
            }
            emit(&mut writer, Event::Start(BytesStart::new(key)))?;
            emit(&mut writer, Event::Text(BytesText::new(&text)))?;
            emit(&mut writer, Event::End(BytesEnd::new(key)))?;
        }
        emit(&mut writer, Event::End(BytesEnd::new(ITEM_ELEMENT)))?;
    }

    emit(&mut writer, Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), SerializeError> {
    writer
        .write_event(event)
        .map_err(|e| SerializeError::Write(e.to_string()))
}

/// Text content for a field value. Null renders empty.
///
/// Characters outside the XML 1.0 `Char` production are dropped.
fn scalar_text(value: &Value) -> String {
    let text = match value {
        Value::Null => return String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    };

    if text.chars().all(is_xml_char) {
        text
    } else {
        text.chars().filter(|&c| is_xml_char(c)).collect()
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}
