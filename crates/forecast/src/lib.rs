//! `scentstock-forecast` — time-series forecasting primitives.
//!
//! Pure, deterministic functions over movement quantities. Every function has
//! a defined result for empty, constant, or single-point input; nothing here
//! returns an error or touches IO.

pub mod average;
pub mod hybrid;
pub mod seasonality;
pub mod stats;
pub mod trend;
pub mod velocity;

pub use average::{exponential_moving_average, simple_moving_average, weighted_moving_average};
pub use hybrid::{ForecastResult, hybrid_forecast};
pub use seasonality::{DEFAULT_MAX_PERIOD, detect_seasonality, seasonal_indices};
pub use stats::{DemandVariance, demand_variance};
pub use trend::{TrendAnalysis, TrendDirection, linear_regression, predict_next_value};
pub use velocity::{Velocity, calculate_velocity};
