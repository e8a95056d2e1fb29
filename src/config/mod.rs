pub mod settings;

pub use settings::{AppConfig, HistorySettings, PredictorSettings, TornSettings};
