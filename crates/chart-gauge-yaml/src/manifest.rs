//! Gauge manifests.
//!
//! A manifest lists one or more gauge configurations under `gauges:`. A
//! document without that key is read as a single gauge configuration.
//! Entry fields are the element attributes in camelCase, with `settings`
//! accepted for `bands` and `distance` for `tickInterval`.

use crate::error::{ManifestError, Result};
use chart_gauge_widgets::{Gauge, GaugeConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One gauge in a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeEntry {
    /// Gauge id; positional name when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Gauge configuration
    #[serde(flatten)]
    pub config: GaugeConfig,
}

impl GaugeEntry {
    /// Entry with an explicit id.
    #[must_use]
    pub fn new(id: impl Into<String>, config: GaugeConfig) -> Self {
        Self {
            id: Some(id.into()),
            config,
        }
    }

    /// The id, or `gauge-{n}` (1-based) for the entry at `index`.
    #[must_use]
    pub fn name(&self, index: usize) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("gauge-{}", index + 1))
    }
}

/// A validated list of gauge configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Gauges in document order
    pub gauges: Vec<GaugeEntry>,
}

impl Manifest {
    /// Manifest holding a single unnamed gauge.
    #[must_use]
    pub fn single(config: GaugeConfig) -> Self {
        Self {
            gauges: vec![GaugeEntry { id: None, config }],
        }
    }

    /// Parse and validate a YAML manifest.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let doc: serde_yaml_ng::Value = serde_yaml_ng::from_str(yaml)?;
        let manifest = if doc.get("gauges").is_some() {
            serde_yaml_ng::from_value(doc)?
        } else {
            Self::single_entry(serde_yaml_ng::from_value(doc)?)
        };
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parse and validate a JSON manifest.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: serde_json::Value = serde_json::from_str(json)?;
        let manifest = if doc.get("gauges").is_some() {
            serde_json::from_value(doc)?
        } else {
            Self::single_entry(serde_json::from_value(doc)?)
        };
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read a manifest file. `.json` files are parsed as JSON, anything
    /// else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let manifest = if is_json {
            Self::from_json(&text)?
        } else {
            Self::from_yaml(&text)?
        };
        tracing::debug!(path = %path.display(), gauges = manifest.gauges.len(), "manifest loaded");
        Ok(manifest)
    }

    fn single_entry(entry: GaugeEntry) -> Self {
        Self {
            gauges: vec![entry],
        }
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every gauge configuration and id uniqueness.
    pub fn validate(&self) -> Result<()> {
        if self.gauges.is_empty() {
            return Err(ManifestError::Empty);
        }
        let mut seen = HashSet::new();
        for (index, entry) in self.gauges.iter().enumerate() {
            let id = entry.name(index);
            entry
                .config
                .validate()
                .map_err(|source| ManifestError::Invalid {
                    id: id.clone(),
                    source,
                })?;
            if !seen.insert(id.clone()) {
                return Err(ManifestError::DuplicateId(id));
            }
        }
        Ok(())
    }

    /// Gauge names in document order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.gauges
            .iter()
            .enumerate()
            .map(|(i, entry)| entry.name(i))
            .collect()
    }

    /// Entry by name.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&GaugeEntry> {
        self.gauges
            .iter()
            .enumerate()
            .find(|(i, entry)| entry.name(*i) == id)
            .map(|(_, entry)| entry)
    }

    /// Build the gauge named `id`.
    pub fn build(&self, id: &str) -> Result<Gauge> {
        let entry = self
            .get(id)
            .ok_or_else(|| ManifestError::UnknownId(id.to_string()))?;
        Self::build_entry(id, entry)
    }

    /// Build every gauge, each with its manifest name as instance id.
    pub fn build_all(&self) -> Result<Vec<Gauge>> {
        self.gauges
            .iter()
            .enumerate()
            .map(|(i, entry)| Self::build_entry(&entry.name(i), entry))
            .collect()
    }

    fn build_entry(id: &str, entry: &GaugeEntry) -> Result<Gauge> {
        let gauge = Gauge::new(entry.config.clone()).map_err(|source| ManifestError::Invalid {
            id: id.to_string(),
            source,
        })?;
        Ok(gauge.with_id(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_gauge_core::GaugeError;
    use chart_gauge_widgets::BandPolicy;
    use proptest::prelude::*;

    const TWO_GAUGES: &str = r##"
gauges:
  - id: cpu
    value: 42
    units: "%"
    settings:
      - { name: Low, from: 0, to: 30, color: green }
      - { name: Medium, from: 30, to: 70, color: "#ffff00" }
      - { name: High, from: 70, to: 100, color: red }
  - value: 12.5
    label: Temperature
    units: "°C"
    min: -20
    max: 40
    distance: 5
    bandPolicy: proportional
    height: null
"##;

    #[test]
    fn test_parse_two_gauges() {
        let manifest = Manifest::from_yaml(TWO_GAUGES).unwrap();
        assert_eq!(manifest.gauges.len(), 2);
        assert_eq!(manifest.ids(), vec!["cpu", "gauge-2"]);

        let cpu = &manifest.get("cpu").unwrap().config;
        assert_eq!(cpu.value, 42.0);
        assert_eq!(cpu.bands.len(), 3);
        assert_eq!(cpu.min_value(), 0.0);
        assert_eq!(cpu.max_value(), 100.0);

        let temp = &manifest.get("gauge-2").unwrap().config;
        assert_eq!(temp.tick_interval, 5.0);
        assert_eq!(temp.band_policy, BandPolicy::Proportional);
        assert_eq!(temp.height, None);
        assert_eq!(temp.min_value(), -20.0);
    }

    #[test]
    fn test_single_document() {
        let manifest = Manifest::from_yaml("value: 75\ntooltip: Load\n").unwrap();
        assert_eq!(manifest.gauges.len(), 1);
        assert_eq!(manifest.gauges[0].config.value, 75.0);
        assert_eq!(manifest.gauges[0].config.tooltip.as_deref(), Some("Load"));
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let manifest = Manifest::from_yaml("gauges:\n  - id: a\n").unwrap();
        assert_eq!(manifest.gauges[0].config, GaugeConfig::default());
    }

    #[test]
    fn test_json_manifest() {
        let json = r#"{"gauges": [{"id": "a", "value": 3, "tickInterval": 20}]}"#;
        let manifest = Manifest::from_json(json).unwrap();
        assert_eq!(manifest.gauges[0].config.tick_interval, 20.0);
    }

    #[test]
    fn test_empty_manifest_rejected() {
        let err = Manifest::from_yaml("gauges: []").unwrap_err();
        assert!(matches!(err, ManifestError::Empty));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let yaml = "gauges:\n  - id: a\n  - id: a\n";
        let err = Manifest::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn test_invalid_gauge_names_entry() {
        let yaml = "gauges:\n  - id: ok\n  - id: bad\n    width: 0\n";
        match Manifest::from_yaml(yaml).unwrap_err() {
            ManifestError::Invalid { id, source } => {
                assert_eq!(id, "bad");
                assert!(matches!(source, GaugeError::InvalidSize { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_color_is_yaml_error() {
        let yaml = "settings:\n  - { from: 0, to: 10, color: notacolor }\n";
        assert!(matches!(
            Manifest::from_yaml(yaml).unwrap_err(),
            ManifestError::Yaml(_)
        ));
    }

    #[test]
    fn test_yaml_roundtrip_preserves_config() {
        let manifest = Manifest::from_yaml(TWO_GAUGES).unwrap();
        let again = Manifest::from_yaml(&manifest.to_yaml().unwrap()).unwrap();
        assert_eq!(manifest, again);
    }

    #[test]
    fn test_build_uses_manifest_id() {
        let manifest = Manifest::from_yaml(TWO_GAUGES).unwrap();
        let gauge = manifest.build("cpu").unwrap();
        assert_eq!(gauge.id(), "cpu");
        assert!(matches!(
            manifest.build("nope").unwrap_err(),
            ManifestError::UnknownId(_)
        ));
        assert_eq!(manifest.build_all().unwrap().len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Manifest::load("/nonexistent/gauges.yaml").unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
    }

    proptest! {
        #[test]
        fn prop_unnamed_entries_get_positional_ids(count in 1usize..12, value in -100.0f64..100.0) {
            let manifest = Manifest {
                gauges: (0..count)
                    .map(|_| GaugeEntry { id: None, config: GaugeConfig::new(value) })
                    .collect(),
            };
            prop_assert!(manifest.validate().is_ok());
            let ids = manifest.ids();
            prop_assert_eq!(ids.len(), count);
            for (i, id) in ids.iter().enumerate() {
                prop_assert_eq!(id, &format!("gauge-{}", i + 1));
                prop_assert!(manifest.get(id).is_some());
            }
        }
    }
}
