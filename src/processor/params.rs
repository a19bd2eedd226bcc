//! Parameter schema and layered validation.
//!
//! Each operation kind is described by a list of layers, applied in order:
//! common block attributes, then file attributes, then I/O attributes, then
//! the operation-specific ones. A layer is a static list of fields, so a new
//! operation only needs a new schema entry.

use std::collections::HashMap;

use crate::model::{IoWindow, Parameters, Timing};

use super::error::BlockError;

/// Key the I/O offset is read from.
///
/// Template files in the wild use the timing keys for the I/O window, so the
/// offset shares its key with `delay` and the length with `repeat`.
pub const OFFSET_KEY: &str = "delay";
/// Key the I/O length is read from. See [`OFFSET_KEY`].
pub const LENGTH_KEY: &str = "repeat";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Non-negative integer, `0` when absent.
    Count,
    /// Opaque text that must be present.
    Required,
    /// Opaque text, empty when absent.
    Optional,
}

/// One schema entry: a parameter key and how to read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub key: &'static str,
    pub rule: Rule,
}

const fn count(key: &'static str) -> Field {
    Field { key, rule: Rule::Count }
}

const fn required(key: &'static str) -> Field {
    Field { key, rule: Rule::Required }
}

const fn optional(key: &'static str) -> Field {
    Field { key, rule: Rule::Optional }
}

pub type Layer = &'static [Field];

pub const BLOCK: Layer = &[count("delay"), count("repeat")];
pub const FILE: Layer = &[required("path")];
pub const FILE_IO: Layer = &[count(OFFSET_KEY), count(LENGTH_KEY)];
pub const FILE_WRITE: Layer = &[required("content")];
pub const WEB: Layer = &[required("uri"), count("retry")];
pub const WEB_POST: Layer = &[optional("content")];

pub const FILE_STAT_SCHEMA: &[Layer] = &[BLOCK, FILE];
pub const FILE_READ_SCHEMA: &[Layer] = &[BLOCK, FILE, FILE_IO];
pub const FILE_WRITE_SCHEMA: &[Layer] = &[BLOCK, FILE, FILE_IO, FILE_WRITE];
pub const WEB_SCHEMA: &[Layer] = &[BLOCK, WEB];
pub const WEB_POST_SCHEMA: &[Layer] = &[BLOCK, WEB, WEB_POST];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Count(u64),
    Text(String),
}

/// Parameters that passed every layer of a schema.
///
/// Only fields named by the schema are present; getters for other keys
/// fall back to the field defaults.
#[derive(Debug, Default)]
pub struct Resolved {
    values: HashMap<&'static str, Value>,
}

impl Resolved {
    pub fn count(&self, key: &str) -> u64 {
        match self.values.get(key) {
            Some(Value::Count(n)) => *n,
            _ => 0,
        }
    }

    pub fn text(&self, key: &str) -> String {
        match self.values.get(key) {
            Some(Value::Text(s)) => s.clone(),
            _ => String::new(),
        }
    }

    pub fn timing(&self) -> Timing {
        Timing {
            delay: self.count("delay"),
            repeat: self.count("repeat"),
        }
    }

    pub fn window(&self) -> IoWindow {
        IoWindow {
            offset: self.count(OFFSET_KEY),
            length: self.count(LENGTH_KEY),
        }
    }
}

/// Run every layer of `schema` over `params`, stopping at the first failure.
pub fn validate(params: &Parameters, schema: &[Layer]) -> Result<Resolved, BlockError> {
    let mut resolved = Resolved::default();
    for layer in schema {
        for field in layer.iter() {
            let value = read_field(params, field)?;
            resolved.values.insert(field.key, value);
        }
    }
    Ok(resolved)
}

fn read_field(params: &Parameters, field: &Field) -> Result<Value, BlockError> {
    let raw = params.get(field.key);
    match (field.rule, raw) {
        (Rule::Count, None) => Ok(Value::Count(0)),
        (Rule::Count, Some(text)) => parse_count(field.key, text).map(Value::Count),
        (Rule::Required, None) => Err(BlockError::MissingParameter { key: field.key }),
        (Rule::Required | Rule::Optional, Some(text)) => Ok(Value::Text(text.clone())),
        (Rule::Optional, None) => Ok(Value::Text(String::new())),
    }
}

/// Parse a non-negative integer the way the template format defines it:
/// an optional sign followed by decimal digits, no surrounding whitespace.
pub fn parse_count(key: &'static str, text: &str) -> Result<u64, BlockError> {
    let invalid = |reason: String| BlockError::InvalidParameter {
        key,
        value: text.to_string(),
        reason,
    };

    let n: i64 = text
        .parse()
        .map_err(|e| invalid(format!("expected an integer ({e})")))?;
    if n < 0 {
        return Err(invalid("expected a non-negative integer".to_string()));
    }
    Ok(n as u64)
}
