//! Row files: a JSON array of `{"x": .., "y": .., "z": ..}` objects.

use std::fs;
use std::path::Path;

use plot::Rows;
use serde::{Deserialize, Serialize};

use crate::error::FormatError;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

pub fn rows_from_json(json: &str) -> Result<Rows, FormatError> {
    let records: Vec<RowRecord> = serde_json::from_str(json)?;
    let mut rows = Rows::new();
    for (index, r) in records.iter().enumerate() {
        if !(r.x.is_finite() && r.y.is_finite() && r.z.is_finite()) {
            return Err(FormatError::InvalidRow {
                index,
                reason: "coordinates must be finite".to_string(),
            });
        }
        rows.push(r.x, r.y, r.z);
    }
    Ok(rows)
}

pub fn rows_to_json(rows: &Rows) -> Result<String, FormatError> {
    let records: Vec<RowRecord> = rows
        .iter()
        .map(|r| RowRecord {
            x: r.x,
            y: r.y,
            z: r.z,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

pub fn read_rows(path: impl AsRef<Path>) -> Result<Rows, FormatError> {
    let payload = fs::read_to_string(path)?;
    rows_from_json(&payload)
}

pub fn write_rows(path: impl AsRef<Path>, rows: &Rows) -> Result<(), FormatError> {
    fs::write(path, rows_to_json(rows)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{read_rows, rows_from_json, write_rows};
    use crate::error::FormatError;
    use plot::Rows;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;

    fn temp_dir(label: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("scatter_rows_{label}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn parses_row_objects_in_order() {
        let rows = rows_from_json(r#"[{"x": 0.5, "y": 3, "z": 1}, {"x": 0, "y": 0, "z": 0}]"#)
            .expect("valid rows");
        assert_eq!(rows.points(), vec![[0.5, 3.0, 1.0], [0.0, 0.0, 0.0]]);
    }

    #[test]
    fn empty_array_is_an_empty_row_set() {
        let rows = rows_from_json("[]").expect("valid rows");
        assert!(rows.is_empty());
    }

    #[test]
    fn rejects_missing_fields() {
        let err = rows_from_json(r#"[{"x": 1, "y": 2}]"#).unwrap_err();
        assert!(matches!(err, FormatError::Parse(_)));
    }

    #[test]
    fn file_round_trip() {
        let dir = temp_dir("round_trip");
        let path = dir.join("rows.json");
        let rows = Rows::from_points([[0.1, 2.5, 0.9], [1.0, 0.0, 0.25]]);
        write_rows(&path, &rows).expect("write rows");
        let loaded = read_rows(&path).expect("read rows");
        assert_eq!(loaded.points(), rows.points());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_rows("/nonexistent/scatter/rows.json").unwrap_err();
        assert!(matches!(err, FormatError::Io(_)));
    }
}
