//! Raw form fields and the permissive number coercion calculators rely on:
//! anything blank or unparseable counts as zero instead of being rejected.

use std::collections::HashMap;

use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    fields: HashMap<String, String>,
}

impl Form {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Flattens a JSON object into raw field strings. Booleans become `1`/`0`
    /// and anything that is not a number or string becomes blank.
    pub fn from_json(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };
        Self::from_pairs(map.iter().map(|(key, value)| {
            let raw = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(true) => "1".to_string(),
                _ => String::new(),
            };
            (key.clone(), raw)
        }))
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn number(&self, key: &str) -> f64 {
        self.raw(key).map(coerce_number).unwrap_or(0.0)
    }

    /// Non-negative whole number, saturating at `u32::MAX`.
    pub fn whole(&self, key: &str) -> u32 {
        let value = self.number(key);
        if value <= 0.0 { 0 } else { value.floor() as u32 }
    }

    /// Checkbox semantics: `on`, `true`, `yes` or any non-zero number.
    pub fn flag(&self, key: &str) -> bool {
        let Some(raw) = self.raw(key) else {
            return false;
        };
        let raw = raw.trim();
        ["on", "true", "yes"]
            .iter()
            .any(|word| raw.eq_ignore_ascii_case(word))
            || coerce_number(raw) != 0.0
    }

    pub fn text(&self, key: &str) -> &str {
        self.raw(key).map(str::trim).unwrap_or("")
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// `Number(raw) || 0`.
pub fn coerce_number(raw: &str) -> f64 {
    match parse_number_literal(raw.trim()) {
        Some(value) if !value.is_nan() => value,
        _ => 0.0,
    }
}

fn parse_number_literal(s: &str) -> Option<f64> {
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        let stripped = s
            .strip_prefix(prefix)
            .or_else(|| s.strip_prefix(&prefix.to_ascii_uppercase()));
        if let Some(digits) = stripped {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return None;
            }
            return u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
        }
    }

    // Rust's float parser also accepts "inf" and "nan" spellings.
    let decimal_syntax = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !decimal_syntax {
        return None;
    }
    s.parse::<f64>().ok()
}
