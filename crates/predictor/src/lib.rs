//! `scentstock-predictor` — per-product restock orchestration.
//!
//! Combines the forecasting primitives and the inventory optimizer into one
//! explainable `RestockPrediction` per product, with batch fan-out, priority
//! ordering, and fragrance-market post-adjustments.

pub mod batch;
pub mod market;
pub mod predict;
pub mod prediction;

pub use batch::{BatchFailure, BatchOutcome, predict_restock_batch, prioritize_restocks};
pub use market::{FragranceCategory, MarketProfile, Season, adjust_for_fragrance_market};
pub use predict::predict_restock;
pub use prediction::{DataQuality, PredictedDemand, RestockPrediction, Urgency};
