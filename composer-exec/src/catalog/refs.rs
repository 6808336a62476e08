use std::collections::HashSet;

/// Follow a local `#/...` reference, refusing cycles.
pub(crate) fn resolve_ref<'a>(
    doc: &'a serde_json::Value,
    ref_str: &str,
    visited: &mut HashSet<String>,
) -> Result<&'a serde_json::Value, RefError> {
    if !ref_str.starts_with('#') {
        return Err(RefError::ExternalRef(ref_str.to_string()));
    }

    let pointer = ref_str.trim_start_matches('#');
    if !visited.insert(ref_str.to_string()) {
        return Err(RefError::Cycle(ref_str.to_string()));
    }

    let target = doc
        .pointer(pointer)
        .ok_or_else(|| RefError::NotFound(ref_str.to_string()))?;
    match target.get("$ref").and_then(|v| v.as_str()) {
        Some(next) => resolve_ref(doc, next, visited),
        None => Ok(target),
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub(crate) enum RefError {
    #[error("unsupported external $ref: {0}")]
    ExternalRef(String),
    #[error("unresolvable $ref: {0}")]
    NotFound(String),
    #[error("cyclic $ref: {0}")]
    Cycle(String),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn follows_chained_refs_and_detects_cycles() {
        let doc = json!({
            "components": {
                "parameters": {
                    "A": {"$ref": "#/components/parameters/B"},
                    "B": {"name": "b", "in": "query"},
                    "C": {"$ref": "#/components/parameters/D"},
                    "D": {"$ref": "#/components/parameters/C"}
                }
            }
        });
        let mut visited = HashSet::new();
        let b = resolve_ref(&doc, "#/components/parameters/A", &mut visited).unwrap();
        assert_eq!(b["name"], "b");

        let mut visited = HashSet::new();
        assert!(matches!(
            resolve_ref(&doc, "#/components/parameters/C", &mut visited),
            Err(RefError::Cycle(_))
        ));
        assert!(matches!(
            resolve_ref(&doc, "other.yaml#/x", &mut HashSet::new()),
            Err(RefError::ExternalRef(_))
        ));
    }
}
