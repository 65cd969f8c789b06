use std::path::Path;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("expected a JSON array of rows in {0}")]
    NotAnArray(String),
}

/// Loads rows from a local dump: either a single JSON array, or one JSON
/// object per line as produced by streaming result fetchers.
pub fn load_rows(filename: &Path) -> Result<Vec<Value>, ImportError> {
    let content = std::fs::read_to_string(filename)?;
    let rows = if content.trim_start().starts_with('[') {
        match serde_json::from_str(&content)? {
            Value::Array(rows) => rows,
            _ => return Err(ImportError::NotAnArray(filename.display().to_string())),
        }
    } else {
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| Ok(serde_json::from_str(line)?))
            .collect::<Result<Vec<Value>, ImportError>>()?
    };
    debug!(rows = rows.len(), file = %filename.display(), "loaded rows");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("atlas-cli-{}-{name}", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_loads_json_array() {
        let path = write_temp("array.json", r#"[{"id": 1}, {"id": 2}]"#);
        let rows = load_rows(&path).unwrap();
        assert_eq!(rows, vec![json!({"id": 1}), json!({"id": 2})]);
    }

    #[test]
    fn test_loads_json_lines() {
        let path = write_temp("rows.jsonl", "{\"id\": 1}\n\n{\"id\": 2}\n");
        let rows = load_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let path = write_temp("broken.json", r#"[1, 2"#);
        assert!(load_rows(&path).is_err());
    }
}
