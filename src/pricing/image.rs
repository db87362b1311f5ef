use std::sync::Arc;

use serde::Serialize;

use super::catalog::{ModelProvider, PricingCatalog, classify_provider};
use super::round_dp;

/// Image costs are coarser-grained than token costs; individual image prices
/// are already whole cents.
const IMAGE_COST_DECIMALS: u32 = 4;

/// Cost breakdown for one image-generation request.
///
/// `size` and `quality` report the tier actually billed, which may differ
/// from the requested pair when the matrix substituted a default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageBreakdown {
    pub provider: ModelProvider,
    pub model: String,
    pub count: i64,
    pub size: String,
    pub quality: String,
    pub cost_per_image: f64,
    pub total_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Computes per-image cost from the catalog's provider rate matrices.
///
/// Pure function of its inputs and the static catalog; never fails. Callers
/// decide whether a zero-cost `error` result is fatal.
#[derive(Debug, Clone)]
pub struct ImageCostCalculator {
    catalog: Arc<PricingCatalog>,
}

impl ImageCostCalculator {
    pub fn new(catalog: Arc<PricingCatalog>) -> Self {
        Self { catalog }
    }

    /// Compute the cost of generating `count` images with the given model.
    ///
    /// `count <= 0` is a valid, costless request. A model without resolvable
    /// image pricing (unrecognized name, or a recognized provider with no
    /// rate for it) yields a zero-cost breakdown carrying a descriptive
    /// `error` instead of raising.
    pub fn compute(&self, model_name: &str, count: i64, size: &str, quality: &str) -> ImageBreakdown {
        let provider = classify_provider(model_name);

        if count <= 0 {
            return ImageBreakdown {
                provider,
                model: model_name.to_string(),
                count,
                size: size.to_string(),
                quality: quality.to_string(),
                cost_per_image: 0.0,
                total_cost: 0.0,
                error: None,
            };
        }

        if provider == ModelProvider::Unknown {
            return ImageBreakdown {
                provider,
                model: model_name.to_string(),
                count,
                size: size.to_string(),
                quality: quality.to_string(),
                cost_per_image: 0.0,
                total_cost: 0.0,
                error: Some(format!(
                    "no image pricing for unrecognized model '{model_name}'"
                )),
            };
        }

        // A recognized provider can still lack image pricing for this model
        // (text-only models); that is reported, never silently zero-billed.
        let Some(quote) = self.catalog.image_rate(provider, model_name, size, quality) else {
            return ImageBreakdown {
                provider,
                model: model_name.to_string(),
                count,
                size: size.to_string(),
                quality: quality.to_string(),
                cost_per_image: 0.0,
                total_cost: 0.0,
                error: Some(format!("no image pricing for model '{model_name}'")),
            };
        };

        ImageBreakdown {
            provider,
            model: model_name.to_string(),
            count,
            size: quote.size,
            quality: quote.quality,
            cost_per_image: quote.rate,
            total_cost: round_dp(quote.rate * count as f64, IMAGE_COST_DECIMALS),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> ImageCostCalculator {
        ImageCostCalculator::new(Arc::new(PricingCatalog::builtin()))
    }

    #[test]
    fn test_dall_e_hd_batch() {
        let breakdown = calculator().compute("dall-e-3", 3, "1024x1024", "hd");
        assert_eq!(breakdown.provider, ModelProvider::OpenAi);
        assert_eq!(breakdown.cost_per_image, 0.08);
        assert_eq!(breakdown.total_cost, 0.24);
        assert!(breakdown.error.is_none());
    }

    #[test]
    fn test_zero_count_is_costless_not_an_error() {
        let breakdown = calculator().compute("dall-e-3", 0, "1024x1024", "hd");
        assert_eq!(breakdown.total_cost, 0.0);
        assert!(breakdown.error.is_none());
    }

    #[test]
    fn test_negative_count_is_costless() {
        let breakdown = calculator().compute("dall-e-3", -5, "1024x1024", "standard");
        assert_eq!(breakdown.total_cost, 0.0);
        assert!(breakdown.error.is_none());
    }

    #[test]
    fn test_unknown_model_reports_error_without_raising() {
        let breakdown = calculator().compute("mystery-diffusion-9", 2, "1024x1024", "standard");
        assert_eq!(breakdown.provider, ModelProvider::Unknown);
        assert_eq!(breakdown.total_cost, 0.0);
        let err = breakdown.error.expect("error field should be set");
        assert!(err.contains("mystery-diffusion-9"));
    }

    #[test]
    fn test_recognized_provider_without_image_pricing_reports_error() {
        // Matches the OpenAI provider pattern but no image family table, and
        // OpenAI has no flat rate.
        let breakdown = calculator().compute("gpt-4o", 3, "1024x1024", "standard");
        assert_eq!(breakdown.provider, ModelProvider::OpenAi);
        assert_eq!(breakdown.cost_per_image, 0.0);
        assert_eq!(breakdown.total_cost, 0.0);
        let err = breakdown.error.expect("error field should be set");
        assert!(err.contains("gpt-4o"));
    }

    #[test]
    fn test_unknown_size_substitutes_default() {
        let breakdown = calculator().compute("dall-e-3", 1, "123x456", "hd");
        assert_eq!(breakdown.size, "1024x1024");
        assert_eq!(breakdown.cost_per_image, 0.08);
    }

    #[test]
    fn test_gpt_image_quality_tiers() {
        let low = calculator().compute("gpt-image-1", 1, "1024x1024", "low");
        let high = calculator().compute("gpt-image-1", 1, "1024x1024", "high");
        assert_eq!(low.cost_per_image, 0.011);
        assert_eq!(high.cost_per_image, 0.167);
    }

    #[test]
    fn test_flat_rate_provider() {
        let breakdown = calculator().compute("imagen-3.0", 4, "anything", "whatever");
        assert_eq!(breakdown.provider, ModelProvider::Google);
        assert_eq!(breakdown.cost_per_image, 0.04);
        assert_eq!(breakdown.total_cost, 0.16);
    }

    #[test]
    fn test_total_rounds_to_four_decimals() {
        // 7 * 0.011 = 0.077, exactly representable after rounding to 4 places.
        let breakdown = calculator().compute("gpt-image-1", 7, "1024x1024", "low");
        assert_eq!(breakdown.total_cost, 0.077);
    }
}
