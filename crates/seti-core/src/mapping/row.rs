//! Typed access to an untyped input row.

use serde_json::{Map, Value};

use seti_model::Amount;

use super::aliases::aliases;
use crate::error::CoercionError;

/// Characters that would split a delimited output line.
const LINE_BREAKING: [char; 3] = ['|', '\r', '\n'];

/// Width of the zero-padded age group code.
pub const AGE_GROUP_WIDTH: usize = 2;

/// Borrowed view over one raw row with the protocol's coercion rules.
///
/// Every accessor takes the canonical field name; Spanish aliases are tried
/// after it, and the first non-null value wins.
#[derive(Debug, Clone, Copy)]
pub struct RowReader<'a> {
    row: &'a Map<String, Value>,
}

impl<'a> RowReader<'a> {
    /// Wrap a raw row. Anything but a JSON object is rejected.
    pub fn new(raw: &'a Value) -> Result<Self, CoercionError> {
        match raw {
            Value::Object(row) => Ok(Self { row }),
            other => Err(CoercionError::NotAnObject {
                raw: other.to_string(),
            }),
        }
    }

    /// Raw value of a field, looked up by canonical name then aliases.
    pub fn get(&self, field: &'static str) -> Option<&'a Value> {
        std::iter::once(field)
            .chain(aliases(field).iter().copied())
            .filter_map(|key| self.row.get(key))
            .find(|value| !value.is_null())
    }

    /// Free text: trimmed, empty when absent.
    pub fn text(&self, field: &'static str) -> Result<String, CoercionError> {
        match self.get(field) {
            None => Ok(String::new()),
            Some(value) => scalar_text(field, value),
        }
    }

    /// Categorical code: trimmed, `default` when absent.
    pub fn code(&self, field: &'static str, default: &str) -> Result<String, CoercionError> {
        match self.get(field) {
            None => Ok(default.to_string()),
            Some(value) => scalar_text(field, value),
        }
    }

    /// Categorical code normalized to upper case.
    pub fn upper_code(&self, field: &'static str, default: &str) -> Result<String, CoercionError> {
        self.code(field, default).map(|code| code.to_uppercase())
    }

    /// Code left-padded with zeros to `width`; longer values are kept whole.
    pub fn padded_code(
        &self,
        field: &'static str,
        default: &str,
        width: usize,
    ) -> Result<String, CoercionError> {
        let code = self.code(field, default)?;
        Ok(zero_pad(&code, width))
    }

    /// Monetary amount; absent, null or blank is zero.
    ///
    /// Strings are parsed as exact decimals and JSON numbers are scaled by
    /// 100. Digits beyond the cent are rounded half away from zero.
    pub fn amount(&self, field: &'static str) -> Result<Amount, CoercionError> {
        match self.get(field) {
            None => Ok(Amount::ZERO),
            Some(value) => amount(field, value),
        }
    }

    /// Non-negative count candidate: absent, null or blank is 0.
    ///
    /// Sign is not checked here; negative values surface as invariant
    /// violations once the entity is built.
    pub fn count(&self, field: &'static str) -> Result<i64, CoercionError> {
        match self.get(field) {
            None => Ok(0),
            Some(value) => integer(field, value),
        }
    }
}

fn scalar_text(field: &'static str, value: &Value) -> Result<String, CoercionError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) if s.contains(LINE_BREAKING) => {
            Err(CoercionError::LineBreakingCharacter {
                field,
                raw: value.to_string(),
            })
        }
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(CoercionError::UnsupportedType {
            field,
            raw: other.to_string(),
        }),
    }
}

fn amount(field: &'static str, value: &Value) -> Result<Amount, CoercionError> {
    let invalid = || CoercionError::InvalidAmount {
        field,
        raw: value.to_string(),
    };
    match value {
        Value::Null => Ok(Amount::ZERO),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(Amount::ZERO);
            }
            parse_cents(trimmed).map(Amount::from_cents).ok_or_else(invalid)
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return i.checked_mul(100).map(Amount::from_cents).ok_or_else(invalid);
            }
            match n.as_f64().map(|f| (f * 100.0).round()) {
                Some(cents) if cents.is_finite() && cents.abs() < i64::MAX as f64 => {
                    Ok(Amount::from_cents(cents as i64))
                }
                _ => Err(invalid()),
            }
        }
        other => Err(CoercionError::UnsupportedType {
            field,
            raw: other.to_string(),
        }),
    }
}

/// `[+-]digits[.digits]` to cents.
fn parse_cents(text: &str) -> Option<i64> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut digits = fraction.bytes().map(|b| i64::from(b - b'0'));
    let tenths = digits.next().unwrap_or(0);
    let hundredths = digits.next().unwrap_or(0);
    let round_up = digits.next().is_some_and(|digit| digit >= 5);
    let cents = whole
        .checked_mul(100)?
        .checked_add(tenths * 10 + hundredths + i64::from(round_up))?;
    Some(if negative { -cents } else { cents })
}

fn integer(field: &'static str, value: &Value) -> Result<i64, CoercionError> {
    let not_an_integer = || CoercionError::NotAnInteger {
        field,
        raw: value.to_string(),
    };
    match value {
        Value::Null => Ok(0),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(0);
            }
            trimmed.parse::<i64>().map_err(|_| not_an_integer())
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(f as i64)
                }
                _ => Err(not_an_integer()),
            }
        }
        other => Err(CoercionError::UnsupportedType {
            field,
            raw: other.to_string(),
        }),
    }
}

fn zero_pad(code: &str, width: usize) -> String {
    format!("{code:0>width$}")
}
