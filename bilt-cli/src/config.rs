use anyhow::{Context, Result};
use bilt_core::{today_in, NonTransactionPatterns};
use bilt_csv::CsvOptions;
use bilt_ingest::amount::MAX_ABS_AMOUNT;
use bilt_ingest::{Extractor, PageMarkers};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{app_home, ensure_app_home};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    /// Replaces the built-in non-transaction denylist when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns: Option<Vec<String>>,
    pub extract: ExtractSection,
    pub export: ExportSection,
    pub markers: PageMarkers,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractSection {
    /// IANA zone "Today"/"Yesterday" resolve in (default: the machine's local zone)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub max_abs_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportSection {
    pub headers: Vec<String>,
    /// Where `export` writes when --out/--out-dir are not given (default: current dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
}

impl Default for ExtractSection {
    fn default() -> Self {
        Self {
            timezone: None,
            max_abs_amount: MAX_ABS_AMOUNT,
        }
    }
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            headers: CsvOptions::default().headers,
            out_dir: None,
        }
    }
}

impl Config {
    pub fn patterns(&self) -> Result<NonTransactionPatterns> {
        match &self.patterns {
            Some(list) => NonTransactionPatterns::from_sources(list),
            None => Ok(NonTransactionPatterns::default()),
        }
    }

    pub fn today(&self) -> Result<chrono::NaiveDate> {
        today_in(self.extract.timezone.as_deref())
    }

    pub fn extractor(&self) -> Result<Extractor> {
        let extractor = Extractor::new(&self.markers, self.patterns()?)
            .context("building extractor from config")?
            .with_today(self.today()?)
            .with_max_abs_amount(self.extract.max_abs_amount);
        Ok(extractor)
    }

    pub fn csv_options(&self) -> CsvOptions {
        CsvOptions {
            headers: self.export.headers.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(app_home()?.join("config.toml"))
}

/// Load `path` (or the default location); a missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = ensure_app_home()?.join("config.toml");
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
