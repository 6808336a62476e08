use std::path::Path;

use crate::catalog::error::CatalogError;
use crate::catalog::model::OpenApiSpec;

pub(crate) fn load_openapi_file(path: &Path, base_url: &str) -> Result<OpenApiSpec, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::NotFound(path.to_path_buf()));
    }
    let body = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let origin = path.display().to_string();
    let raw = parse_openapi_str(&body).map_err(|message| CatalogError::Format {
        origin: origin.clone(),
        message,
    })?;
    Ok(OpenApiSpec {
        source: origin,
        base_url: base_url.to_string(),
        raw,
    })
}

/// Parse an OpenAPI document given as JSON or YAML.
///
/// The document must be a mapping at the top level.
pub fn parse_openapi_str(body: &str) -> Result<serde_json::Value, String> {
    let value = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(v) => v,
        Err(json_err) => {
            let y = serde_yaml::from_str::<serde_yaml::Value>(body).map_err(|yaml_err| {
                format!("neither valid JSON ({json_err}) nor valid YAML ({yaml_err})")
            })?;
            serde_json::to_value(y).map_err(|e| e.to_string())?
        }
    };
    if !value.is_object() {
        return Err("OpenAPI document must be a mapping at the top level".to_string());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_numeric_response_keys_become_strings() {
        let v = parse_openapi_str("paths:\n  /a:\n    get:\n      responses:\n        200: {description: ok}\n")
            .unwrap();
        assert!(v.pointer("/paths/~1a/get/responses/200").is_some());
    }

    #[test]
    fn scalar_documents_are_rejected() {
        assert!(parse_openapi_str("just a string").is_err());
        assert!(parse_openapi_str("[1, 2]").is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        let err = parse_openapi_str("{ not: [valid").unwrap_err();
        assert!(err.contains("neither valid JSON"));
    }
}
