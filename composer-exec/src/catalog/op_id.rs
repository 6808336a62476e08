use crate::catalog::model::{method_keys, ResolvedOperation};
use crate::catalog::shape::{collect_parameters, select_base_url};

pub(crate) fn find_operation_by_id(
    doc: &serde_json::Value,
    base_url: &str,
    operation_id: &str,
) -> Option<ResolvedOperation> {
    operation_objects(doc)
        .find(|(_, _, _, opid)| *opid == operation_id)
        .map(|(path, method, op, opid)| resolve(doc, base_url, path, method, op, opid))
}

pub(crate) fn list_operations(doc: &serde_json::Value, base_url: &str) -> Vec<ResolvedOperation> {
    operation_objects(doc)
        .map(|(path, method, op, opid)| resolve(doc, base_url, path, method, op, opid))
        .collect()
}

/// Every (path, method, operation, operationId) in document order.
///
/// Path-item keys that are not HTTP methods and operations without an
/// `operationId` are skipped.
fn operation_objects(
    doc: &serde_json::Value,
) -> impl Iterator<Item = (&str, &'static str, &serde_json::Value, &str)> {
    doc.get("paths")
        .and_then(|v| v.as_object())
        .into_iter()
        .flat_map(|paths| paths.iter())
        .filter_map(|(path, item)| item.as_object().map(|obj| (path.as_str(), obj)))
        .flat_map(|(path, item_obj)| {
            item_obj.iter().filter_map(move |(key, op)| {
                let method = method_keys().iter().find(|m| **m == key.as_str())?;
                let opid = op.get("operationId")?.as_str()?;
                Some((path, *method, op, opid))
            })
        })
}

fn resolve(
    doc: &serde_json::Value,
    base_url: &str,
    path: &str,
    method: &str,
    op: &serde_json::Value,
    operation_id: &str,
) -> ResolvedOperation {
    let base_url = if base_url.is_empty() {
        select_base_url(doc, path, op).unwrap_or_default()
    } else {
        base_url.to_string()
    };
    let description = ["summary", "description"]
        .iter()
        .find_map(|k| op.get(*k).and_then(|v| v.as_str()))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    ResolvedOperation {
        operation_id: operation_id.to_string(),
        method: method.to_uppercase(),
        path: path.to_string(),
        base_url,
        description,
        parameters: collect_parameters(doc, path, op),
    }
}
