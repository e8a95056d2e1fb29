use thiserror::Error;

pub type Result<T> = std::result::Result<T, PredictionError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// Rejected before any search runs
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The extrapolated lead never reaches the decaying target inside the search window
    #[error("lead trend too slow: no crossing before hour {ceiling_hours}")]
    NoConvergence { ceiling_hours: f64 },

    /// Decay alone cannot bring the target down to the current lead within the bound
    #[error("decay alone cannot reach the current lead within {bound_hours} hours")]
    DecayCannotResolve { bound_hours: u32 },
}

impl PredictionError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
