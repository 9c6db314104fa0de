//! Ordered from→to key remap rules.
//!
//! The same list type backs both `simple_modifications` and
//! `fn_function_keys`. Rule order is kept exactly as read; downstream
//! matching gives earlier rules precedence.

use serde_json::{Map, Value, json};
use tracing::trace;

use crate::error::{SchemaError, SchemaResult};

/// A single remap rule.
///
/// Both sides are open JSON objects (`{"key_code": "f1"}`,
/// `{"consumer_key_code": "mute"}`, ...). An empty `to` means the rule is
/// unassigned and the source key keeps its hardware default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMapping {
    from: Map<String, Value>,
    to: Map<String, Value>,
}

impl KeyMapping {
    #[must_use]
    pub const fn new(from: Map<String, Value>, to: Map<String, Value>) -> Self {
        Self { from, to }
    }

    /// Rule from `{"key_code": <from>}` with an empty target.
    #[must_use]
    pub fn unassigned_key_code(key_code: &str) -> Self {
        let mut from = Map::new();
        from.insert("key_code".to_string(), Value::String(key_code.to_string()));
        Self::new(from, Map::new())
    }

    /// Rule from `{"key_code": <from>}` to `{"key_code": <to>}`.
    #[must_use]
    pub fn key_code(from: &str, to: &str) -> Self {
        let mut mapping = Self::unassigned_key_code(from);
        mapping
            .to
            .insert("key_code".to_string(), Value::String(to.to_string()));
        mapping
    }

    pub const fn from(&self) -> &Map<String, Value> {
        &self.from
    }

    pub const fn to(&self) -> &Map<String, Value> {
        &self.to
    }

    /// The `key_code` of the source, if the source is a plain key code.
    pub fn from_key_code(&self) -> Option<&str> {
        self.from.get("key_code").and_then(Value::as_str)
    }

    pub fn is_unassigned(&self) -> bool {
        self.to.is_empty()
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "from": Value::Object(self.from.clone()),
            "to": Value::Object(self.to.clone()),
        })
    }

    fn parse(entry: &Value) -> SchemaResult<Self> {
        let object = entry
            .as_object()
            .ok_or_else(|| SchemaError::not_an_object(entry))?;

        let from = match object.get("from") {
            Some(Value::Object(from)) => from.clone(),
            Some(other) => return Err(SchemaError::wrong_type("from", "object", other)),
            None => return Err(SchemaError::missing("from")),
        };

        let to = match object.get("to") {
            Some(Value::Object(to)) => to.clone(),
            Some(other) => return Err(SchemaError::wrong_type("to", "object", other)),
            None => Map::new(),
        };

        Ok(Self { from, to })
    }
}

/// Ordered list of [`KeyMapping`] rules, unique by `from`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMappingList {
    mappings: Vec<KeyMapping>,
}

impl KeyMappingList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a JSON array of `{"from": ..., "to": ...}` objects into the list.
    ///
    /// A rule whose `from` already exists replaces that rule's target in
    /// place; any other rule is appended. Nothing is merged if an entry is
    /// invalid. Entry errors are wrapped with the entry's `[index]`.
    pub fn update(&mut self, json: &Value) -> SchemaResult<()> {
        let entries = json
            .as_array()
            .ok_or_else(|| SchemaError::not_an_array(json))?;

        let parsed = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                KeyMapping::parse(entry).map_err(|e| e.within(format!("[{index}]")))
            })
            .collect::<SchemaResult<Vec<_>>>()?;

        for mapping in parsed {
            self.upsert(mapping);
        }

        trace!(count = self.mappings.len(), "Merged key mappings");
        Ok(())
    }

    /// Serialize to a JSON array in list order.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Array(self.mappings.iter().map(KeyMapping::to_json).collect())
    }

    /// Insert a rule, replacing the target of an existing rule with the same source.
    ///
    /// This is the only way rules enter the list, so sources stay unique and a
    /// serialized list loads back unchanged.
    pub fn upsert(&mut self, mapping: KeyMapping) {
        match self.mappings.iter_mut().find(|m| m.from == mapping.from) {
            Some(existing) => existing.to = mapping.to,
            None => self.mappings.push(mapping),
        }
    }

    /// Remove and return the rule at `index`.
    pub fn remove(&mut self, index: usize) -> Option<KeyMapping> {
        (index < self.mappings.len()).then(|| self.mappings.remove(index))
    }

    /// Replace the target of the rule at `index`. Returns false if out of range.
    pub fn replace_to(&mut self, index: usize, to: Map<String, Value>) -> bool {
        match self.mappings.get_mut(index) {
            Some(mapping) => {
                mapping.to = to;
                true
            }
            None => false,
        }
    }

    /// Find the rule whose source equals `from`.
    pub fn find(&self, from: &Map<String, Value>) -> Option<&KeyMapping> {
        self.mappings.iter().find(|m| &m.from == from)
    }

    pub fn clear(&mut self) {
        self.mappings.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeyMapping> {
        self.mappings.iter()
    }

    pub fn get(&self, index: usize) -> Option<&KeyMapping> {
        self.mappings.get(index)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl<'a> IntoIterator for &'a KeyMappingList {
    type Item = &'a KeyMapping;
    type IntoIter = std::slice::Iter<'a, KeyMapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<KeyMapping> for KeyMappingList {
    fn from_iter<I: IntoIterator<Item = KeyMapping>>(iter: I) -> Self {
        let mut list = Self::new();
        for mapping in iter {
            list.upsert(mapping);
        }
        list
    }
}
