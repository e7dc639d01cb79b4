//! JSON record of built transactions, merged into an existing file if present.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Store `transaction` under `transactions[label]`, keeping every other entry.
pub fn write_transaction_record(path: &Path, label: &str, transaction: &Value) -> Result<()> {
    let now = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let existing = if path.exists() {
        fs::read_to_string(path).with_context(|| format!("failed reading {}", path.display()))?
    } else {
        String::new()
    };

    let mut root: Value = if existing.trim().is_empty() {
        json!({})
    } else {
        serde_json::from_str(&existing)
            .with_context(|| format!("failed parsing JSON in {}", path.display()))?
    };
    if !root.is_object() {
        root = json!({});
    }

    root["updated_at"] = json!(now);
    if root.get("transactions").and_then(Value::as_object).is_none() {
        root["transactions"] = json!({});
    }
    root["transactions"][label] = json!({
        "transaction": transaction,
        "built_at": now,
    });

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("failed creating {}", dir.display()))?;

    // Readers never observe a half-written record: write a sibling, then swap it in.
    let staged = staging_path(path);
    let body = serde_json::to_vec_pretty(&root).context("failed serialising transaction record")?;
    fs::write(&staged, body).with_context(|| format!("failed writing {}", staged.display()))?;
    fs::rename(&staged, path).with_context(|| {
        format!("failed moving {} over {}", staged.display(), path.display())
    })
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".partial");
    name.into()
}
