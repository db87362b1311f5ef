use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::{PricingCatalog, PricingEntry, SearchTierRates};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid pricing overrides: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Pricing overrides layered over the builtin catalog at load time.
///
/// An entry keyed `default` replaces the catalog's fallback entry.
///
/// # Example Configuration
///
/// ```toml
/// version = "2025-06.1"
///
/// [models."gpt-4.1"]
/// input_rate = 2.00
/// output_rate = 8.00
/// cached_rate = 0.50
///
/// [search_tiers]
/// low = 0.030
/// medium = 0.035
/// high = 0.050
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogOverrides {
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub models: HashMap<String, PricingEntry>,

    #[serde(default)]
    pub search_tiers: Option<SearchTierRates>,
}

impl CatalogOverrides {
    pub fn from_toml(document: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(document)?)
    }

    /// Build the process-wide catalog: the builtin table with these
    /// overrides merged on top. The result is immutable after this point.
    pub fn into_catalog(self) -> PricingCatalog {
        let mut catalog = PricingCatalog::builtin();
        if let Some(version) = self.version {
            catalog.set_version(version);
        }
        for (model, entry) in self.models {
            catalog.set_entry(&model, entry);
        }
        if let Some(tiers) = self.search_tiers {
            catalog.set_search_tiers(tiers);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_merge_over_builtin() {
        let overrides = CatalogOverrides::from_toml(
            r#"
            version = "2025-06.1"

            [models."gpt-4.1"]
            input_rate = 3.00
            output_rate = 9.00

            [models."house-model"]
            input_rate = 0.25
            output_rate = 1.00
            "#,
        )
        .unwrap();

        let catalog = overrides.into_catalog();
        assert_eq!(catalog.version(), "2025-06.1");
        assert_eq!(catalog.lookup("gpt-4.1").input_rate, 3.00);
        assert_eq!(catalog.lookup("house-model").input_rate, 0.25);
        // Untouched builtin entries survive the merge.
        assert_eq!(catalog.lookup("gpt-4o").input_rate, 2.50);
    }

    #[test]
    fn test_default_entry_override() {
        let overrides = CatalogOverrides::from_toml(
            r#"
            [models.default]
            input_rate = 5.00
            output_rate = 20.00
            "#,
        )
        .unwrap();

        let catalog = overrides.into_catalog();
        assert_eq!(catalog.lookup("never-heard-of-it").input_rate, 5.00);
        assert_eq!(catalog.default_entry().output_rate, 20.00);
    }

    #[test]
    fn test_empty_overrides_is_builtin() {
        let catalog = CatalogOverrides::default().into_catalog();
        assert_eq!(catalog.version(), "2025-06");
        assert_eq!(catalog.lookup("gpt-4.1").input_rate, 2.00);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(CatalogOverrides::from_toml("surprise = true").is_err());
    }
}
