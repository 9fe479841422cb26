//! Model module containing data structures

mod confidence_interval;
mod decomposition_result;
mod fit_mode;
mod forecast_point;
mod trend_kind;
mod trend_model;

pub use confidence_interval::ConfidenceInterval;
pub use decomposition_result::DecompositionResult;
pub use fit_mode::FitMode;
pub use forecast_point::{ForecastPoint, ForecastTable};
pub use trend_kind::TrendKind;
pub use trend_model::TrendModel;
