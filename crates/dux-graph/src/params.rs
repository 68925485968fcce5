//! Flat `key=value&…` codec for [`ViewState`], as kept in a URL fragment.
//!
//! Every field is declared once in [`VIEW_STATE_FIELDS`] with the kind of
//! raw string it carries. Decoding is forgiving: a field that is missing or
//! does not parse keeps whatever value it had, so a stale or hand-edited
//! fragment degrades to the defaults instead of failing.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{Error, Result, ViewState};

/// How the raw string of a fragment field is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Taken as-is.
    String,
    /// Parsed as JSON.
    Json,
    /// `true` only for the literal `"true"`.
    Boolean,
}

impl ParamKind {
    /// Typed value of `raw`, or `None` when it does not parse.
    pub fn parse(self, raw: &str) -> Option<Value> {
        match self {
            ParamKind::String => Some(Value::String(raw.to_string())),
            ParamKind::Boolean => Some(Value::Bool(raw == "true")),
            ParamKind::Json => serde_json::from_str(raw).ok(),
        }
    }
}

/// Fragment keys of [`ViewState`] in write order.
pub const VIEW_STATE_FIELDS: &[(&str, ParamKind)] = &[
    ("selectedId", ParamKind::String),
    ("focusId", ParamKind::String),
    ("layoutDirection", ParamKind::String),
    ("removedIds", ParamKind::Json),
    ("whiteListIds", ParamKind::Json),
    ("groupByModules", ParamKind::Boolean),
    ("embedSpecialActions", ParamKind::Boolean),
];

/// Split a fragment into decoded `(key, value)` pairs, first occurrence wins.
fn decode_pairs(fragment: &str) -> Map<String, Value> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let mut pairs = Map::new();

    for pair in fragment.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let (Ok(key), Ok(value)) = (decode_component(key), decode_component(value)) else {
            debug!(pair, "skipping fragment pair that is not valid percent-encoding");
            continue;
        };
        if !pairs.contains_key(&key) {
            pairs.insert(key, Value::String(value));
        }
    }

    pairs
}

fn decode_component(raw: &str) -> std::result::Result<String, std::string::FromUtf8Error> {
    urlencoding::decode(&raw.replace('+', " ")).map(|decoded| decoded.into_owned())
}

/// Raw fragment string for a typed field value; `None` for empty values.
fn encode_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

impl ViewState {
    /// Decode a fragment on top of the default state.
    pub fn from_fragment(fragment: &str) -> Self {
        let mut state = Self::default();
        state.apply_fragment(fragment);
        state
    }

    /// Overwrite the fields present in `fragment`, leaving the rest alone.
    ///
    /// Returns the number of fields that were applied.
    pub fn apply_fragment(&mut self, fragment: &str) -> usize {
        let pairs = decode_pairs(fragment);
        let Ok(Value::Object(mut fields)) = serde_json::to_value(&*self) else {
            return 0;
        };

        let mut applied = 0;
        for (key, kind) in VIEW_STATE_FIELDS {
            let Some(raw) = pairs.get(*key).and_then(Value::as_str) else {
                continue;
            };
            if raw.is_empty() {
                continue;
            }
            let Some(value) = kind.parse(raw) else {
                warn!(field = *key, "ignoring view state field that does not parse");
                continue;
            };

            let previous = fields.insert((*key).to_string(), value);
            match serde_json::from_value::<ViewState>(Value::Object(fields.clone())) {
                Ok(_) => applied += 1,
                Err(err) => {
                    warn!(field = *key, error = %err, "ignoring view state field with an invalid value");
                    match previous {
                        Some(previous) => fields.insert((*key).to_string(), previous),
                        None => fields.remove(*key),
                    };
                }
            }
        }

        if let Ok(state) = serde_json::from_value::<ViewState>(Value::Object(fields)) {
            *self = state;
        }
        applied
    }

    /// Encode as a fragment, omitting empty fields.
    pub fn to_fragment(&self) -> Result<String> {
        let value = serde_json::to_value(self).map_err(Error::Serialization)?;
        let Value::Object(fields) = value else {
            return Err(Error::InvalidViewState("view state did not encode as an object".into()));
        };

        let encoded: Vec<String> = VIEW_STATE_FIELDS
            .iter()
            .filter_map(|(key, _)| {
                let raw = encode_value(fields.get(*key)?)?;
                Some(format!("{key}={}", urlencoding::encode(&raw)))
            })
            .collect();
        Ok(encoded.join("&"))
    }
}
