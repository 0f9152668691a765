//! JSON array flattening into JSON-lines records.
//!
//! Nested object keys are joined with `_`. Every leaf becomes a string:
//! strings lose their line breaks, numbers use their shortest decimal form,
//! booleans become `true`/`false` and null becomes `nil`. Arrays are dropped.

use crate::{Result, RummageError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One flattened object, keys sorted.
pub type FlatRecord = BTreeMap<String, String>;

/// Flatten every element of a JSON array. Elements that are not objects yield
/// an empty record.
///
/// # Errors
///
/// `RummageError::Serialization` if `input` is not JSON, `RummageError::Validation`
/// if the top-level value is not an array.
pub fn flatten_json(input: &[u8]) -> Result<Vec<FlatRecord>> {
    let value: Value = serde_json::from_slice(input)?;
    let Value::Array(items) = value else {
        return Err(RummageError::validation("JSON input must be an array of objects"));
    };

    Ok(items
        .iter()
        .map(|item| {
            let mut record = FlatRecord::new();
            if let Value::Object(object) = item {
                flatten_into(object, "", &mut record);
            }
            record
        })
        .collect())
}

fn flatten_into(object: &Map<String, Value>, prefix: &str, record: &mut FlatRecord) {
    for (key, value) in object {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}_{key}")
        };

        let leaf = match value {
            Value::Object(nested) => {
                flatten_into(nested, &name, record);
                continue;
            }
            Value::Array(_) => continue,
            Value::String(s) => s.replace(['\n', '\r'], " "),
            Value::Number(n) => render_number(n),
            Value::Bool(b) => b.to_string(),
            Value::Null => "nil".to_string(),
        };
        record.insert(name, leaf);
    }
}

fn render_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
    }
}

/// Flatten the JSON array in `input` and write one record per line to
/// `out_dir/FJ<unix-nanos>.txt`, creating `out_dir` if needed.
///
/// Returns the path written.
pub fn flatten_json_file(input: impl AsRef<Path>, out_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let input = input.as_ref();
    let out_dir = out_dir.as_ref();

    let bytes = std::fs::read(input)?;
    let records = flatten_json(&bytes)?;

    std::fs::create_dir_all(out_dir)?;
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let path = out_dir.join(format!("FJ{nanos}.txt"));

    let mut out = std::io::BufWriter::new(std::fs::File::create(&path)?);
    for record in &records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    tracing::debug!(input = %input.display(), output = %path.display(), records = records.len(), "flattened JSON");
    Ok(path)
}
