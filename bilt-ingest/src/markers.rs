//! Structural markers of the activity page, kept as data so markup drift is a config change.

use anyhow::{anyhow, Result};
use scraper::Selector;
use serde::{Deserialize, Serialize};

/// Raw (serialisable) marker set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageMarkers {
    /// Date heading element (stable strategy)
    pub heading: String,
    /// Class fragments the heading's parent must carry (stable strategy)
    pub heading_parent_classes: Vec<String>,
    /// Class fragments identifying a transaction row; headers nested in one are ignored
    pub row_container_classes: Vec<String>,
    /// Class fragments of the block that follows a heading and holds that day's rows
    pub transaction_container_classes: Vec<String>,
    pub card_marker: String,
    pub points_marker: String,
    pub payee_label: String,
    pub amount_label: String,
    /// Tried in order to read the date-range dropdown's label
    pub filter_labels: Vec<LabelProbe>,
}

/// One way of reading the filter label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelProbe {
    pub selector: String,
    /// Narrower element inside the match to read text from, if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner: Option<String>,
    /// Texts this long or longer are not labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
    /// Drop icon glyphs and other non-word characters
    #[serde(default)]
    pub strip_symbols: bool,
}

impl LabelProbe {
    fn simple(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            inner: None,
            max_len: Some(50),
            strip_symbols: false,
        }
    }
}

impl Default for PageMarkers {
    fn default() -> Self {
        let strings = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            heading: r#"p[class*="sc-mHBLV"]"#.to_string(),
            heading_parent_classes: strings(&["sc-ksXGtu", "hTvhYZ"]),
            row_container_classes: strings(&["sc-eXnvfo", "sc-gDxZeH"]),
            transaction_container_classes: strings(&["sc-eXnvfo"]),
            card_marker: r#"[data-testid="icon-bilt-card-regular"]"#.to_string(),
            points_marker: r#"[data-testid="icon-bilt-points-regular"]"#.to_string(),
            // fwWhJc is the pre-2026 payee class
            payee_label: r#"[class*="fhbElE"], [class*="fwWhJc"]"#.to_string(),
            amount_label: r#"[class*="lkndMw"]"#.to_string(),
            filter_labels: vec![
                LabelProbe {
                    selector: r#"button[role="combobox"]"#.to_string(),
                    inner: Some("span span span".to_string()),
                    max_len: None,
                    strip_symbols: true,
                },
                LabelProbe::simple(r#"[class*="sc-iitTBb"]"#),
                LabelProbe::simple(r#"[class*="filter"]"#),
                LabelProbe::simple(r#"[class*="dropdown"] [class*="text"]"#),
                LabelProbe::simple(r#"button[id*="_r_n_"]"#),
            ],
        }
    }
}

/// Marker set with every selector parsed.
#[derive(Debug, Clone)]
pub struct CompiledMarkers {
    pub heading: Selector,
    pub heading_parent_classes: Vec<String>,
    pub row_container_classes: Vec<String>,
    pub transaction_container_classes: Vec<String>,
    pub card_marker: Selector,
    pub points_marker: Selector,
    pub payee_label: Selector,
    pub amount_label: Selector,
    pub filter_labels: Vec<CompiledProbe>,
}

#[derive(Debug, Clone)]
pub struct CompiledProbe {
    pub selector: Selector,
    pub inner: Option<Selector>,
    pub max_len: Option<usize>,
    pub strip_symbols: bool,
}

impl PageMarkers {
    pub fn compile(&self) -> Result<CompiledMarkers> {
        let filter_labels = self
            .filter_labels
            .iter()
            .map(|p| -> Result<CompiledProbe> {
                Ok(CompiledProbe {
                    selector: selector(&p.selector)?,
                    inner: p.inner.as_deref().map(selector).transpose()?,
                    max_len: p.max_len,
                    strip_symbols: p.strip_symbols,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CompiledMarkers {
            heading: selector(&self.heading)?,
            heading_parent_classes: self.heading_parent_classes.clone(),
            row_container_classes: self.row_container_classes.clone(),
            transaction_container_classes: self.transaction_container_classes.clone(),
            card_marker: selector(&self.card_marker)?,
            points_marker: selector(&self.points_marker)?,
            payee_label: selector(&self.payee_label)?,
            amount_label: selector(&self.amount_label)?,
            filter_labels,
        })
    }
}

fn selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| anyhow!("invalid selector `{s}`: {e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_compile() {
        let compiled = PageMarkers::default().compile().unwrap();
        assert_eq!(compiled.filter_labels.len(), 5);
        assert!(compiled.filter_labels[0].inner.is_some());
    }

    #[test]
    fn test_bad_selector_is_an_error() {
        let markers = PageMarkers {
            card_marker: "[data-testid=".to_string(),
            ..PageMarkers::default()
        };
        let err = markers.compile().unwrap_err();
        assert!(err.to_string().contains("invalid selector"));
    }
}
