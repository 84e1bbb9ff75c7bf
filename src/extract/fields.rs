//! Field extraction from parsed forecast pages.
//!
//! A field is located by a CSS selector and read either from element
//! text or from a named attribute. Every raw string goes through the
//! same numeric coercion: if it parses as a decimal number once a comma
//! is accepted as the decimal separator, it becomes a number, otherwise
//! it stays text. Wind directions like "СВ" and condition summaries
//! therefore survive as strings while readings become `f64`.

use scraper::{ElementRef, Html, Selector};

use crate::error::{GismeteoError, Result};

/// A raw value pulled from the page, before typed deserialization.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Coerce a raw string: numeric-shaped input becomes a number.
    pub fn coerce(raw: &str) -> Self {
        match numeric_shaped(raw) {
            Some(number) => Value::Number(number),
            None => Value::Text(raw.to_string()),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => serde_json::json!(n),
            Value::Text(s) => serde_json::Value::String(s),
        }
    }
}

/// Parse a string as a decimal number, treating comma as the decimal
/// separator. Rejects empty input and non-finite results.
pub fn numeric_shaped(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// How a field's raw value is read from a matched element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// The element's own text content, trimmed.
    Text,
    /// The literal value of a named attribute.
    Attr(&'static str),
}

/// Default applied when an optional field has no matching nodes at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    /// Numeric severity/pollen-like fields default to `0`.
    Zero,
    /// Condition-description fields default to the text `"unknown"`.
    Unknown,
}

impl FieldDefault {
    pub fn value(&self) -> Value {
        match self {
            FieldDefault::Zero => Value::Number(0.0),
            FieldDefault::Unknown => Value::Text("unknown".to_string()),
        }
    }
}

/// Identifies one column of a forecast page: where to look, how to read
/// it, and whether its absence is acceptable.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub selector: &'static str,
    pub mode: ExtractMode,
    pub default: Option<FieldDefault>,
}

impl FieldDescriptor {
    /// Required text-mode field.
    pub fn text(name: &'static str, selector: &'static str) -> Self {
        Self {
            name,
            selector,
            mode: ExtractMode::Text,
            default: None,
        }
    }

    /// Required attribute-mode field.
    pub fn attr(name: &'static str, selector: &'static str, attr: &'static str) -> Self {
        Self {
            name,
            selector,
            mode: ExtractMode::Attr(attr),
            default: None,
        }
    }

    /// Optional text-mode field with a documented default.
    pub fn text_or(name: &'static str, selector: &'static str, default: FieldDefault) -> Self {
        Self {
            name,
            selector,
            mode: ExtractMode::Text,
            default: Some(default),
        }
    }
}

/// Compile a resolved selector. Selectors are crate constants, so a
/// failure here means the constant itself is malformed.
fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| GismeteoError::parse(format!("invalid selector '{selector}': {e}")))
}

/// Extract one coerced value per matching element, in document order.
/// Zero matches is a valid result meaning "field absent on this page".
pub fn select_values(document: &Html, selector: &str, mode: ExtractMode) -> Result<Vec<Value>> {
    let compiled = compile(selector)?;
    let values = document
        .select(&compiled)
        .filter_map(|element| match mode {
            ExtractMode::Text => Some(Value::coerce(&element_text(element))),
            ExtractMode::Attr(attr) => element.value().attr(attr).map(Value::coerce),
        })
        .collect();
    Ok(values)
}

/// Extract the raw (uncoerced) string per matching element.
pub fn select_strings(document: &Html, selector: &str, mode: ExtractMode) -> Result<Vec<String>> {
    let compiled = compile(selector)?;
    let strings = document
        .select(&compiled)
        .filter_map(|element| match mode {
            ExtractMode::Text => Some(element_text(element)),
            ExtractMode::Attr(attr) => element.value().attr(attr).map(str::to_string),
        })
        .collect();
    Ok(strings)
}

/// First matching element's coerced value, if any.
pub fn first_value(document: &Html, selector: &str, mode: ExtractMode) -> Result<Option<Value>> {
    Ok(select_values(document, selector, mode)?.into_iter().next())
}

/// Last matching element's trimmed text, if any.
pub fn last_text(document: &Html, selector: &str) -> Result<Option<String>> {
    Ok(select_strings(document, selector, ExtractMode::Text)?
        .into_iter()
        .last())
}

/// Text of the first match, restricted to the element's direct text
/// nodes. Used where a reading and its unit label share one parent.
pub fn own_text(document: &Html, selector: &str) -> Result<Option<String>> {
    let compiled = compile(selector)?;
    Ok(document.select(&compiled).next().map(|element| {
        element
            .children()
            .filter_map(|node| node.value().as_text().map(|text| text.to_string()))
            .collect::<String>()
            .trim()
            .to_string()
    }))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
