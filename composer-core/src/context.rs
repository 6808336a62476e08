use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::expressions::Reference;

/// Suffix of the context key a successful step contributes.
pub const ID_KEY_SUFFIX: &str = "_id";

/// Key/value state accumulated during one plan execution.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RunContext {
    values: BTreeMap<String, JsonValue>,
}

/// The single context entry a successful step may contribute.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedEntry {
    pub key: String,
    pub value: JsonValue,
}

impl DerivedEntry {
    /// A JSON object body carrying `id` yields `<step_name>_id`.
    pub fn from_response(step_name: &str, body: &JsonValue) -> Option<Self> {
        let id = body.as_object()?.get("id")?;
        Some(Self {
            key: format!("{step_name}{ID_KEY_SUFFIX}"),
            value: id.clone(),
        })
    }
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: JsonValue) {
        self.values.insert(key.into(), value);
    }

    pub fn apply(&mut self, entry: DerivedEntry) {
        self.values.insert(entry.key, entry.value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.values.iter()
    }

    /// Missing keys and fields resolve to `null`.
    pub fn lookup(&self, reference: &Reference) -> JsonValue {
        let Some(mut cur) = self.values.get(reference.key()) else {
            return JsonValue::Null;
        };
        for seg in reference.rest() {
            let next = match cur {
                JsonValue::Object(map) => map.get(seg),
                JsonValue::Array(arr) => seg.parse::<usize>().ok().and_then(|i| arr.get(i)),
                _ => None,
            };
            match next {
                Some(v) => cur = v,
                None => return JsonValue::Null,
            }
        }
        cur.clone()
    }

    /// Resolve one declared input value.
    ///
    /// Strings shaped like `${...}` are looked up; a malformed path resolves to
    /// `null` exactly like a missing key. Everything else passes through.
    pub fn resolve_value(&self, value: &JsonValue) -> JsonValue {
        match value {
            JsonValue::String(s) if Reference::is_reference(s) => match Reference::parse(s) {
                Ok(r) => self.lookup(&r),
                Err(_) => JsonValue::Null,
            },
            other => other.clone(),
        }
    }

    pub fn resolve_inputs(
        &self,
        inputs: &BTreeMap<String, JsonValue>,
    ) -> BTreeMap<String, JsonValue> {
        inputs
            .iter()
            .map(|(k, v)| (k.clone(), self.resolve_value(v)))
            .collect()
    }
}
