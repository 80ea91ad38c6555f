//! `scentstock-core` — shared foundation for the restock engine.
//!
//! This crate contains the **inputs** to a prediction run (catalog snapshots,
//! sales histories, supplier cost models), the engine error model, strongly
//! typed identifiers, and the explicit configuration value object. It has no
//! knowledge of forecasting or optimization math.

pub mod catalog;
pub mod config;
pub mod error;
pub mod id;

pub use catalog::{PriceBreak, ProductSnapshot, SalesHistory, SupplierCostModel, TimeSeriesPoint};
pub use config::PredictorConfig;
pub use error::{EngineError, EngineResult};
pub use id::{ProductId, SupplierId};
