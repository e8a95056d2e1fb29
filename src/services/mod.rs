pub mod forecasting;
pub mod report;

pub use forecasting::{ForecastReport, ForecastService};
