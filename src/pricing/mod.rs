//! Deterministic multi-tier cost computation for LLM usage samples.
//!
//! Rates live in an immutable [`PricingCatalog`] built once at startup.
//! [`CostEngine`] turns a [`UsageSample`] into a [`CostBreakdown`];
//! [`ImageCostCalculator`] prices image-generation requests from the
//! catalog's provider rate matrices. All of it is pure and shareable.

mod catalog;
mod cost;
mod image;

pub use catalog::{
    ImageRateQuote, ModelProvider, PricingCatalog, PricingEntry, SearchContextTier,
    SearchTierRates, classify_provider,
};
pub use cost::{CostBreakdown, CostEngine, CostError, ImageRequest, UsageSample};
pub use image::{ImageBreakdown, ImageCostCalculator};

/// Round a dollar amount to `places` decimal places.
///
/// Applied exactly once per monetary field, at output time, never
/// mid-computation.
pub(crate) fn round_dp(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
