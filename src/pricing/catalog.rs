use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The vendor family a model name belongs to.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ModelProvider {
    OpenAi,
    Google,
    #[default]
    Unknown,
}

impl ModelProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Google => "google",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered substring patterns for provider classification. The first match
/// wins, so a name matching several families classifies as the earliest
/// pattern in this list. Check order is part of the contract.
const PROVIDER_PATTERNS: &[(&str, ModelProvider)] = &[
    ("gpt", ModelProvider::OpenAi),
    ("dall-e", ModelProvider::OpenAi),
    ("gemini", ModelProvider::Google),
    ("imagen", ModelProvider::Google),
];

/// Classify a free-form model name into a provider family.
///
/// This is a best-effort heuristic over name substrings, not a registry
/// lookup. Unseen future model names classify as [`ModelProvider::Unknown`]
/// rather than failing.
pub fn classify_provider(model_name: &str) -> ModelProvider {
    let name = model_name.to_ascii_lowercase();
    for (pattern, provider) in PROVIDER_PATTERNS {
        if name.contains(pattern) {
            return *provider;
        }
    }
    ModelProvider::Unknown
}

/// Coarse tier approximating how much retrieved context a web-search-augmented
/// query consumes. Used only when a model has no explicit per-query rate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SearchContextTier {
    Low,
    #[default]
    Medium,
    High,
}

impl SearchContextTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Lenient parse: unrecognized tier strings fall back to `Medium`.
    pub fn from_str(s: &str) -> Self {
        match s {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }
}

impl std::fmt::Display for SearchContextTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-query rates for each search context tier, in dollars.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchTierRates {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl SearchTierRates {
    pub fn rate(&self, tier: SearchContextTier) -> f64 {
        match tier {
            SearchContextTier::Low => self.low,
            SearchContextTier::Medium => self.medium,
            SearchContextTier::High => self.high,
        }
    }
}

/// Token and search rates for one model.
///
/// Token rates are dollars per 1,000,000 tokens. Search rates are dollars
/// per query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PricingEntry {
    /// Dollars per 1M standard input tokens.
    #[serde(default)]
    pub input_rate: f64,

    /// Dollars per 1M output tokens.
    #[serde(default)]
    pub output_rate: f64,

    /// Dollars per 1M cached input tokens. When absent the effective rate is
    /// half the input rate; the cached rate never exceeds the input rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_rate: Option<f64>,

    /// Explicit per-query web-search rate. Overrides the context-tier rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_rate: Option<f64>,

    /// Per-query rate for grounded search (Gemini-style grounding). Consulted
    /// after `search_rate` and before the context-tier table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_grounding_rate: Option<f64>,
}

/// A tiered per-image rate matrix keyed by size then quality.
///
/// Unknown sizes substitute `default_size`; unknown qualities substitute
/// `default_quality` within the resolved size row. Lookups are total.
#[derive(Debug, Clone)]
pub struct TieredImageRates {
    default_size: &'static str,
    default_quality: &'static str,
    /// size -> quality -> dollars per image
    rates: HashMap<&'static str, HashMap<&'static str, f64>>,
}

impl TieredImageRates {
    fn new(
        default_size: &'static str,
        default_quality: &'static str,
        table: &[(&'static str, &[(&'static str, f64)])],
    ) -> Self {
        let rates: HashMap<&'static str, HashMap<&'static str, f64>> = table
            .iter()
            .map(|(size, qualities)| (*size, qualities.iter().copied().collect()))
            .collect();
        debug_assert!(
            rates
                .get(default_size)
                .is_some_and(|row| row.contains_key(default_quality)),
            "rate matrix must contain its default size/quality pair"
        );
        Self {
            default_size,
            default_quality,
            rates,
        }
    }

    /// Resolve a rate, substituting defaults for unknown size/quality.
    /// Returns the rate together with the size and quality actually billed,
    /// or `None` for a matrix missing its own default pair.
    fn resolve(&self, size: &str, quality: &str) -> Option<(f64, &'static str, &'static str)> {
        let (size_key, row) = match self.rates.get_key_value(size) {
            Some((k, v)) => (*k, v),
            None => (self.default_size, self.rates.get(self.default_size)?),
        };
        match row.get_key_value(quality) {
            Some((k, rate)) => Some((*rate, size_key, *k)),
            None => row
                .get(self.default_quality)
                .map(|rate| (*rate, size_key, self.default_quality)),
        }
    }
}

/// Per-image pricing for one model family: either a size/quality matrix or a
/// single flat rate applied regardless of size and quality.
#[derive(Debug, Clone)]
pub enum ImageRates {
    Tiered(TieredImageRates),
    Flat(f64),
}

/// A resolved per-image rate plus the size/quality pair it was billed under.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRateQuote {
    pub rate: f64,
    pub size: String,
    pub quality: String,
}

/// Immutable table of per-model rates plus a guaranteed `default` fallback
/// entry. Constructed once at startup and shared by reference; never mutated
/// after load.
#[derive(Debug, Clone)]
pub struct PricingCatalog {
    version: String,
    models: HashMap<String, PricingEntry>,
    default_entry: PricingEntry,
    search_tiers: SearchTierRates,
    /// Image rate tables keyed by model-family substring, checked in order.
    image_families: Vec<(&'static str, ImageRates)>,
    /// Flat per-image rates by provider, used when no family pattern matches.
    image_provider_flat: HashMap<ModelProvider, f64>,
}

impl PricingCatalog {
    /// The builtin versioned catalog.
    pub fn builtin() -> Self {
        let mut models = HashMap::new();
        models.insert(
            "gpt-4.1".to_string(),
            PricingEntry {
                input_rate: 2.00,
                output_rate: 8.00,
                cached_rate: Some(0.50),
                ..Default::default()
            },
        );
        models.insert(
            "gpt-4.1-mini".to_string(),
            PricingEntry {
                input_rate: 0.40,
                output_rate: 1.60,
                cached_rate: Some(0.10),
                ..Default::default()
            },
        );
        models.insert(
            "gpt-4o".to_string(),
            PricingEntry {
                input_rate: 2.50,
                output_rate: 10.00,
                cached_rate: Some(1.25),
                ..Default::default()
            },
        );
        models.insert(
            "gpt-4o-mini".to_string(),
            PricingEntry {
                input_rate: 0.15,
                output_rate: 0.60,
                cached_rate: Some(0.075),
                ..Default::default()
            },
        );
        models.insert(
            "o3".to_string(),
            PricingEntry {
                input_rate: 2.00,
                output_rate: 8.00,
                cached_rate: Some(0.50),
                ..Default::default()
            },
        );
        models.insert(
            "gemini-2.5-pro".to_string(),
            PricingEntry {
                input_rate: 1.25,
                output_rate: 10.00,
                cached_rate: Some(0.31),
                search_grounding_rate: Some(0.035),
                ..Default::default()
            },
        );
        models.insert(
            "gemini-2.5-flash".to_string(),
            PricingEntry {
                input_rate: 0.30,
                output_rate: 2.50,
                cached_rate: Some(0.075),
                search_grounding_rate: Some(0.035),
                ..Default::default()
            },
        );
        models.insert(
            "claude-sonnet-4".to_string(),
            PricingEntry {
                input_rate: 3.00,
                output_rate: 15.00,
                cached_rate: Some(0.30),
                ..Default::default()
            },
        );

        let image_families = vec![
            (
                "dall-e-2",
                ImageRates::Tiered(TieredImageRates::new(
                    "1024x1024",
                    "standard",
                    &[
                        ("256x256", &[("standard", 0.016)]),
                        ("512x512", &[("standard", 0.018)]),
                        ("1024x1024", &[("standard", 0.02)]),
                    ],
                )),
            ),
            (
                "dall-e",
                ImageRates::Tiered(TieredImageRates::new(
                    "1024x1024",
                    "standard",
                    &[
                        ("1024x1024", &[("standard", 0.04), ("hd", 0.08)]),
                        ("1792x1024", &[("standard", 0.08), ("hd", 0.12)]),
                        ("1024x1792", &[("standard", 0.08), ("hd", 0.12)]),
                    ],
                )),
            ),
            (
                "gpt-image",
                ImageRates::Tiered(TieredImageRates::new(
                    "1024x1024",
                    "medium",
                    &[
                        ("1024x1024", &[("low", 0.011), ("medium", 0.042), ("high", 0.167)]),
                        ("1024x1536", &[("low", 0.016), ("medium", 0.063), ("high", 0.25)]),
                        ("1536x1024", &[("low", 0.016), ("medium", 0.063), ("high", 0.25)]),
                    ],
                )),
            ),
            ("imagen", ImageRates::Flat(0.04)),
        ];

        let mut image_provider_flat = HashMap::new();
        image_provider_flat.insert(ModelProvider::Google, 0.04);

        Self {
            version: "2025-06".to_string(),
            models,
            default_entry: PricingEntry {
                input_rate: 1.00,
                output_rate: 4.00,
                ..Default::default()
            },
            search_tiers: SearchTierRates {
                low: 0.030,
                medium: 0.035,
                high: 0.050,
            },
            image_families,
            image_provider_flat,
        }
    }

    /// Catalog version identifier.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Look up the pricing entry for a model. Absent models resolve to the
    /// `default` entry; this lookup is total and never fails.
    pub fn lookup(&self, model_name: &str) -> &PricingEntry {
        self.models.get(model_name).unwrap_or(&self.default_entry)
    }

    /// The entry used for models absent from the catalog.
    pub fn default_entry(&self) -> &PricingEntry {
        &self.default_entry
    }

    /// Effective cached-input rate for an entry: the explicit cached rate if
    /// set, else half the input rate.
    pub fn effective_cached_rate(&self, entry: &PricingEntry) -> f64 {
        entry.cached_rate.unwrap_or(entry.input_rate * 0.5)
    }

    /// Per-query rate for web search: explicit model rate first, then the
    /// grounded-search rate, then the context-tier table.
    pub fn search_rate(&self, entry: &PricingEntry, tier: SearchContextTier) -> f64 {
        entry
            .search_rate
            .or(entry.search_grounding_rate)
            .unwrap_or_else(|| self.search_tiers.rate(tier))
    }

    /// Per-image rate for a provider/model, substituting the default size and
    /// then the default quality when the requested pair is absent from a
    /// tiered matrix. Flat-rate providers return their constant regardless of
    /// size and quality. `None` when the model matches no family table and
    /// the provider has no flat rate; callers decide how to report that.
    pub fn image_rate(
        &self,
        provider: ModelProvider,
        model_name: &str,
        size: &str,
        quality: &str,
    ) -> Option<ImageRateQuote> {
        let name = model_name.to_ascii_lowercase();
        for (pattern, rates) in &self.image_families {
            if !name.contains(pattern) {
                continue;
            }
            return match rates {
                ImageRates::Tiered(matrix) => {
                    matrix
                        .resolve(size, quality)
                        .map(|(rate, billed_size, billed_quality)| ImageRateQuote {
                            rate,
                            size: billed_size.to_string(),
                            quality: billed_quality.to_string(),
                        })
                }
                ImageRates::Flat(rate) => Some(ImageRateQuote {
                    rate: *rate,
                    size: size.to_string(),
                    quality: quality.to_string(),
                }),
            };
        }
        self.image_provider_flat
            .get(&provider)
            .map(|rate| ImageRateQuote {
                rate: *rate,
                size: size.to_string(),
                quality: quality.to_string(),
            })
    }

    /// Replace or add model entries. An entry keyed `default` replaces the
    /// fallback entry.
    pub(crate) fn set_entry(&mut self, model_name: &str, entry: PricingEntry) {
        if model_name == "default" {
            self.default_entry = entry;
        } else {
            self.models.insert(model_name.to_string(), entry);
        }
    }

    pub(crate) fn set_search_tiers(&mut self, tiers: SearchTierRates) {
        self.search_tiers = tiers;
    }

    pub(crate) fn set_version(&mut self, version: String) {
        self.version = version;
    }
}
