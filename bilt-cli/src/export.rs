//! Writing the generated CSV to disk (the browser's "download" step).

use anyhow::{Context, Result};
use bilt_core::export_filename;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// `--out` wins; otherwise `bilt-transactions-<suffix>.csv` inside `out_dir` (or the current dir).
pub fn resolve_output(
    out: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    filter_selection: &str,
    today: NaiveDate,
) -> PathBuf {
    if let Some(out) = out {
        return out;
    }
    let name = export_filename(Some(filter_selection), today);
    out_dir.unwrap_or_else(|| PathBuf::from(".")).join(name)
}

pub fn write_export(path: &Path, csv: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    fs::write(path, csv).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), bytes = csv.len(), "wrote export");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 19).unwrap()
    }

    #[test]
    fn test_resolve_output() {
        assert_eq!(
            resolve_output(Some("a.csv".into()), Some("dir".into()), "February-2026", today()),
            PathBuf::from("a.csv")
        );
        assert_eq!(
            resolve_output(None, Some("dir".into()), "February-2026", today()),
            PathBuf::from("dir/bilt-transactions-February-2026.csv")
        );
        assert_eq!(
            resolve_output(None, None, "", today()),
            PathBuf::from("./bilt-transactions-2026-02-19.csv")
        );
    }

    #[test]
    fn test_write_export_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.csv");
        write_export(&path, "Date,Payee,Amount,Category,Memo").unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Date,Payee,Amount,Category,Memo"
        );
    }
}
