use std::path::Path;

use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode export: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
}

fn ensure_parent(path: &Path) -> Result<(), ExportError> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => std::fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            path: path.display().to_string(),
            source,
        }),
        None => Ok(()),
    }
}

/// Write `value` as pretty JSON, creating parent directories.
pub fn export_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ExportError> {
    ensure_parent(path)?;
    let mut body = serde_json::to_string_pretty(value)?;
    body.push('\n');
    std::fs::write(path, body).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Write `rows` as CSV with a header taken from the first row's fields.
///
/// Nothing is written when `rows` is empty.
pub fn export_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), ExportError> {
    if rows.is_empty() {
        return Ok(());
    }
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/summary.json");
        export_json(&path, &json!({"plan_id": "p1"})).unwrap();
        let back: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, json!({"plan_id": "p1"}));
    }

    #[derive(Serialize)]
    struct Row {
        id: i64,
        goal: &'static str,
        status: &'static str,
    }

    #[test]
    fn csv_has_header_and_quotes_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/history.csv");
        let rows = [
            Row { id: 2, goal: "Onboard Ada, then email", status: "success" },
            Row { id: 1, goal: "Ping", status: "planned" },
        ];
        export_csv(&path, &rows).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            body,
            "id,goal,status\n2,\"Onboard Ada, then email\",success\n1,Ping,planned\n"
        );
    }

    #[test]
    fn empty_csv_export_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        export_csv::<Row>(&path, &[]).unwrap();
        assert!(!path.exists());
    }
}
