use std::collections::HashSet;

use composer_core::{OperationParam, ParamLocation};

use crate::catalog::refs::resolve_ref;

/// Path-item and operation parameters merged into one list.
///
/// Unresolvable `$ref`s are dropped; parameters are advisory and never
/// validated before dispatch.
pub(crate) fn collect_parameters(
    doc: &serde_json::Value,
    path: &str,
    operation: &serde_json::Value,
) -> Vec<OperationParam> {
    let mut params = Vec::new();
    if let Some(p) = doc
        .get("paths")
        .and_then(|paths| paths.get(path))
        .and_then(|item| item.get("parameters"))
    {
        params.extend(extract_params_with_refs(doc, p));
    }
    if let Some(p) = operation.get("parameters") {
        params.extend(extract_params_with_refs(doc, p));
    }
    OperationParam::dedupe(params)
}

/// Prefer operation.servers[0].url, then path-item.servers[0].url, then doc.servers[0].url.
pub(crate) fn select_base_url(
    doc: &serde_json::Value,
    path: &str,
    operation: &serde_json::Value,
) -> Option<String> {
    if let Some(url) = servers_first_url(operation) {
        return Some(url);
    }
    if let Some(path_item) = doc.get("paths").and_then(|p| p.get(path)) {
        if let Some(url) = servers_first_url(path_item) {
            return Some(url);
        }
    }
    servers_first_url(doc)
}

fn servers_first_url(v: &serde_json::Value) -> Option<String> {
    let servers = v.get("servers")?.as_array()?;
    let first = servers.first()?.as_object()?;
    first.get("url")?.as_str().map(|s| s.to_string())
}

fn extract_params_with_refs(
    doc: &serde_json::Value,
    parameters: &serde_json::Value,
) -> Vec<OperationParam> {
    let Some(arr) = parameters.as_array() else {
        return Vec::new();
    };

    arr.iter()
        .filter_map(|p| match p.get("$ref").and_then(|v| v.as_str()) {
            Some(r) => resolve_ref(doc, r, &mut HashSet::new())
                .ok()
                .and_then(extract_parameter_obj),
            None => extract_parameter_obj(p),
        })
        .collect()
}

fn extract_parameter_obj(p: &serde_json::Value) -> Option<OperationParam> {
    let name = p.get("name").and_then(|v| v.as_str())?;
    let location = p
        .get("in")
        .and_then(|v| v.as_str())
        .and_then(ParamLocation::parse)?;
    let required = location == ParamLocation::Path
        || p.get("required").and_then(|v| v.as_bool()).unwrap_or(false);
    Some(OperationParam {
        name: name.to_string(),
        location,
        required,
    })
}
