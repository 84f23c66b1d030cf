//! Classification of atomic values.

use crate::*;

/// A parsed atomic value.
#[derive(Clone, Debug, PartialEq)]
pub enum Constant {
    Symbol(String),
    String(String),
    Integer(i64),
    Float(f64),
    Null,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstantType {
    Symbol,
    String,
    Integer,
    Float,
    Null,
}

impl Constant {
    /// Parses raw PENMAN text; quoted text is unescaped.
    pub fn evaluate(raw: Option<&str>) -> Result<Constant, ConstantError> {
        let Some(raw) = raw else { return Ok(Constant::Null) };
        if raw.is_empty() {
            return Err(ConstantError::Empty);
        }
        if let Some(body) = raw.strip_prefix('"') {
            return match body.strip_suffix('"') {
                | Some(inner) if !escapes_final_quote(inner) => Ok(Constant::String(unescape(inner))),
                | _ => Err(ConstantError::UnterminatedString(raw.to_string())),
            };
        }
        if let Ok(int) = raw.parse::<i64>() {
            return Ok(Constant::Integer(int));
        }
        // `inf` and `nan` are symbols here
        let numeric = raw.chars().all(|c| c.is_ascii_digit() || "+-.eE".contains(c))
            && raw.chars().any(|c| c.is_ascii_digit());
        if numeric {
            if let Ok(float) = raw.parse::<f64>() {
                return Ok(Constant::Float(float));
            }
        }
        Ok(Constant::Symbol(raw.to_string()))
    }

    pub fn constant_type(&self) -> ConstantType {
        match self {
            | Constant::Symbol(_) => ConstantType::Symbol,
            | Constant::String(_) => ConstantType::String,
            | Constant::Integer(_) => ConstantType::Integer,
            | Constant::Float(_) => ConstantType::Float,
            | Constant::Null => ConstantType::Null,
        }
    }
}

/// The type of raw PENMAN text.
pub fn constant_type(raw: Option<&str>) -> Result<ConstantType, ConstantError> {
    Constant::evaluate(raw).map(|c| c.constant_type())
}

/// Renders `text` as a quoted string constant.
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

fn escapes_final_quote(inner: &str) -> bool {
    inner.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            | '\\' => out.extend(chars.next()),
            | c => out.push(c),
        }
    }
    out
}
