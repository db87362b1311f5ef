use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::{PricingCatalog, SearchContextTier};
use super::image::{ImageBreakdown, ImageCostCalculator};
use super::round_dp;

const TOKENS_PER_UNIT: f64 = 1_000_000.0;

/// Token costs round to 8 decimal places; image costs round to 4. The
/// asymmetry is preserved observed behavior, not a correction target.
const TOKEN_COST_DECIMALS: u32 = 8;

#[derive(Debug, Error)]
pub enum CostError {
    /// Caller contract violation: the usage sample cannot describe a real
    /// request.
    #[error("invalid usage sample: {0}")]
    InvalidUsage(String),
}

/// An image-generation request attached to a usage sample.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageRequest {
    pub provider_model: String,
    pub count: i64,
    pub size: String,
    pub quality: String,
}

/// Usage counters for one model call, as reported by the provider API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UsageSample {
    /// Input tokens billed at the full input rate.
    #[serde(default)]
    pub standard_input_tokens: u64,

    /// Input tokens eligible for the reduced cached rate.
    #[serde(default)]
    pub cached_input_tokens: u64,

    #[serde(default)]
    pub output_tokens: u64,

    #[serde(default)]
    pub search_queries: u64,

    #[serde(default)]
    pub search_context: SearchContextTier,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_request: Option<ImageRequest>,
}

impl UsageSample {
    pub fn new(standard_input_tokens: u64, cached_input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            standard_input_tokens,
            cached_input_tokens,
            output_tokens,
            ..Default::default()
        }
    }

    pub fn with_search(mut self, queries: u64, context: SearchContextTier) -> Self {
        self.search_queries = queries;
        self.search_context = context;
        self
    }

    pub fn with_images(mut self, request: ImageRequest) -> Self {
        self.image_request = Some(request);
        self
    }
}

/// Cost breakdown for one usage sample, in dollars.
///
/// Search fields are present only when the sample had search queries; image
/// fields only when it carried an image request. Every monetary field is
/// rounded independently to 8 decimal places exactly once, at output time;
/// `total_cost` sums the already-rounded sub-costs and is rounded after
/// summation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub standard_input_cost: f64,
    pub cached_input_cost: f64,
    pub output_cost: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_queries: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_context: Option<SearchContextTier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_generation_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_generation: Option<ImageBreakdown>,

    pub total_cost: f64,
}

/// Combines token, search and image sub-costs into one breakdown.
///
/// Pure function of its inputs and the static catalog; holds no mutable
/// state and is safe to share across callers.
#[derive(Debug, Clone)]
pub struct CostEngine {
    catalog: Arc<PricingCatalog>,
    images: ImageCostCalculator,
}

impl CostEngine {
    pub fn new(catalog: Arc<PricingCatalog>) -> Self {
        let images = ImageCostCalculator::new(Arc::clone(&catalog));
        Self { catalog, images }
    }

    pub fn catalog(&self) -> &PricingCatalog {
        &self.catalog
    }

    /// Compute the cost breakdown for a usage sample.
    ///
    /// A model absent from the catalog silently uses the `default` entry:
    /// degraded accuracy, not an error.
    pub fn compute_cost(
        &self,
        model_name: &str,
        usage: &UsageSample,
    ) -> Result<CostBreakdown, CostError> {
        if let Some(request) = &usage.image_request {
            if request.provider_model.trim().is_empty() {
                return Err(CostError::InvalidUsage(
                    "image request has an empty provider_model".to_string(),
                ));
            }
        }

        let entry = self.catalog.lookup(model_name);

        let standard_input_cost = round_dp(
            usage.standard_input_tokens as f64 / TOKENS_PER_UNIT * entry.input_rate,
            TOKEN_COST_DECIMALS,
        );
        let cached_input_cost = round_dp(
            usage.cached_input_tokens as f64 / TOKENS_PER_UNIT
                * self.catalog.effective_cached_rate(entry),
            TOKEN_COST_DECIMALS,
        );
        let output_cost = round_dp(
            usage.output_tokens as f64 / TOKENS_PER_UNIT * entry.output_rate,
            TOKEN_COST_DECIMALS,
        );

        let mut total = standard_input_cost + cached_input_cost + output_cost;

        let (search_cost, search_queries, search_context) = if usage.search_queries > 0 {
            let per_query = self.catalog.search_rate(entry, usage.search_context);
            let cost = round_dp(usage.search_queries as f64 * per_query, TOKEN_COST_DECIMALS);
            total += cost;
            (Some(cost), Some(usage.search_queries), Some(usage.search_context))
        } else {
            (None, None, None)
        };

        let (image_generation_cost, image_generation) = match &usage.image_request {
            Some(request) => {
                let breakdown = self.images.compute(
                    &request.provider_model,
                    request.count,
                    &request.size,
                    &request.quality,
                );
                total += breakdown.total_cost;
                (Some(breakdown.total_cost), Some(breakdown))
            }
            None => (None, None),
        };

        Ok(CostBreakdown {
            standard_input_cost,
            cached_input_cost,
            output_cost,
            search_cost,
            search_queries,
            search_context,
            image_generation_cost,
            image_generation,
            total_cost: round_dp(total, TOKEN_COST_DECIMALS),
        })
    }

    /// Compute an image-only cost breakdown. Never fails; see
    /// [`ImageCostCalculator::compute`].
    pub fn compute_image_cost(
        &self,
        model_name: &str,
        count: i64,
        size: &str,
        quality: &str,
    ) -> ImageBreakdown {
        self.images.compute(model_name, count, size, quality)
    }
}
