use super::errors::{PredictionError, Result};
use super::types::{GoalResolution, GoalSource, Hours, Score};
use crate::config::settings::PredictorSettings;

/// Number of whole hours of decay applied at `hour`.
///
/// The exponent uses the floored elapsed hour, so a check at 36.5 decays the
/// same as one at 36.0. The linear lead model does not floor.
pub fn decay_hours(hour: Hours, config: &PredictorSettings) -> f64 {
    (hour.floor() - config.grace_hours as f64).max(0.0)
}

/// Target the lead has to reach at `hour`, starting from the undecayed goal
pub fn decayed_target(starting_goal: Score, hour: Hours, config: &PredictorSettings) -> Score {
    starting_goal * config.decay_factor.powf(decay_hours(hour, config))
}

/// Inverse of [`decayed_target`]: recovers the original goal from a target
/// observed at `hour`.
pub fn infer_starting_goal(
    current_target: Score,
    hour: Hours,
    config: &PredictorSettings,
) -> Score {
    current_target / config.decay_factor.powf(decay_hours(hour, config))
}

pub fn resolve_goal(
    source: &GoalSource,
    hour: Hours,
    config: &PredictorSettings,
) -> Result<GoalResolution> {
    match *source {
        GoalSource::Explicit {
            goal,
            observed_target,
        } => {
            ensure_positive(goal, "starting goal")?;
            let inferred_goal = observed_target
                .filter(|target| target.is_finite() && *target > 0.0)
                .map(|target| infer_starting_goal(target, hour, config));
            Ok(GoalResolution {
                starting_goal: goal,
                inferred_goal,
            })
        }
        GoalSource::InferFromDecayedTarget { current_target } => {
            ensure_positive(current_target, "current target")?;
            let goal = infer_starting_goal(current_target, hour, config);
            Ok(GoalResolution {
                starting_goal: goal,
                inferred_goal: Some(goal),
            })
        }
    }
}

fn ensure_positive(value: Score, what: &str) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PredictionError::invalid(format!(
            "{what} must be a positive number, got {value}"
        )))
    }
}
