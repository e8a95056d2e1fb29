//! Ranked war outcome forecasting.
//!
//! Pure and synchronous: nothing here logs, touches the filesystem or the
//! network. Failures come back as [`PredictionError`].

pub mod decay;
pub mod errors;
pub mod no_more_hits;
pub mod predictor;
mod search;
pub mod types;

pub use decay::{decayed_target, infer_starting_goal, resolve_goal};
pub use errors::{PredictionError, Result};
pub use no_more_hits::{estimate_no_more_hits, estimate_no_more_hits_from};
pub use predictor::{forecast, predict_war_end, project_curve};
pub use types::{
    CurvePoint, Forecast, GoalResolution, GoalSource, NoMoreHitsOutcome, PredictionResult,
    RaceSnapshot,
};
