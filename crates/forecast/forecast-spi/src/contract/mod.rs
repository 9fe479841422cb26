//! Contract module containing trait definitions for forecast operations

mod confidence_interval_computer;
mod decomposer;
mod forecast_sink;
mod trend_fitter;

pub use confidence_interval_computer::ConfidenceIntervalComputer;
pub use decomposer::Decomposer;
pub use forecast_sink::ForecastSink;
pub use trend_fitter::TrendFitter;
