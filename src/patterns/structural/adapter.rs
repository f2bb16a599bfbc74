use crate::utils::error::{LabError, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::io::Write;

/// XML as handed out by the modern service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlData {
    content: String,
}

impl XmlData {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn xml_content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Default)]
pub struct ModernService;

impl ModernService {
    pub fn get_data(&self) -> XmlData {
        tracing::debug!("ModernService: fetching data and packing it as XML");
        XmlData::new("<data><item name='Product A'><price>120.50</price></item></data>")
    }
}

pub struct XmlToJsonAdapter {
    xml: XmlData,
}

impl XmlToJsonAdapter {
    pub fn new(xml: XmlData) -> Self {
        Self { xml }
    }

    /// `{"items": {name: price}}`, or `{"error": ...}` when the XML cannot
    /// be read.
    pub fn to_json(&self) -> Value {
        tracing::debug!("Adapter: converting XML to JSON");
        match parse_items(self.xml.xml_content()) {
            Ok(items) => json!({ "items": items }),
            Err(e) => {
                tracing::warn!("Adapter: {}", e);
                json!({ "error": "Could not parse the XML" })
            }
        }
    }
}

fn parse_items(xml: &str) -> Result<Map<String, Value>> {
    let document = roxmltree::Document::parse(xml)
        .map_err(|e| LabError::validation(format!("malformed XML: {}", e)))?;

    let mut items = Map::new();
    for item in document
        .root_element()
        .children()
        .filter(|node| node.has_tag_name("item"))
    {
        let Some(name) = item.attribute("name").filter(|name| !name.is_empty()) else {
            continue;
        };
        let Some(text) = item
            .children()
            .find(|node| node.has_tag_name("price"))
            .and_then(|price| price.text())
            .filter(|text| !text.is_empty())
        else {
            continue;
        };
        let value: f64 = text.trim().parse().map_err(|_| {
            LabError::validation(format!("price '{}' is not a number", text))
        })?;
        items.insert(name.to_string(), json!(value));
    }
    Ok(items)
}

/// The legacy renderer: JSON indented with four spaces.
pub fn display_json(data: &Value) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    data.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|e| LabError::invalid_state(e.to_string()))
}

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    let xml = ModernService.get_data();
    writeln!(out, "Modern service returned: {}", xml.xml_content())?;

    let adapter = XmlToJsonAdapter::new(xml);
    let json = adapter.to_json();

    writeln!(out, "--- Showing data in the legacy system (JSON format) ---")?;
    writeln!(out, "{}", display_json(&json)?)?;
    writeln!(out, "{}", "-".repeat(58))?;
    Ok(())
}
