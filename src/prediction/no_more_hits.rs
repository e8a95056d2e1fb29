use super::decay::{decayed_target, resolve_goal};
use super::errors::{PredictionError, Result};
use super::predictor::{validate_finite, validate_goal, validate_hour};
use super::types::{GoalSource, Hours, NoMoreHitsOutcome, Score};
use crate::config::settings::PredictorSettings;

/// Hour at which the decaying target drops to the current lead if neither
/// side scores again.
///
/// Steps forward one whole hour at a time, so the running target is
/// multiplied by the decay factor once per elapsed hour past the grace period.
pub fn estimate_no_more_hits(
    current_hour: Hours,
    current_lead: Score,
    starting_goal: Score,
    config: &PredictorSettings,
) -> Result<NoMoreHitsOutcome> {
    validate_hour(current_hour)?;
    validate_finite(current_lead, "current lead")?;
    validate_goal(starting_goal)?;

    if current_lead == 0.0 {
        return Ok(NoMoreHitsOutcome::ZeroLead);
    }

    let lead = current_lead.abs();
    (0..=config.no_more_hits_bound_hours)
        .map(|offset| current_hour + f64::from(offset))
        .map(|hour| (hour, decayed_target(starting_goal, hour, config)))
        .find(|&(_, target)| target <= lead)
        .map(|(end_hour, target_at_end)| NoMoreHitsOutcome::Ends {
            end_hour,
            hours_remaining: end_hour - current_hour,
            target_at_end,
        })
        .ok_or(PredictionError::DecayCannotResolve {
            bound_hours: config.no_more_hits_bound_hours,
        })
}

/// Same as [`estimate_no_more_hits`], resolving the goal from `goal` first
pub fn estimate_no_more_hits_from(
    current_hour: Hours,
    current_lead: Score,
    goal: &GoalSource,
    config: &PredictorSettings,
) -> Result<NoMoreHitsOutcome> {
    validate_hour(current_hour)?;
    let resolution = resolve_goal(goal, current_hour, config)?;
    estimate_no_more_hits(current_hour, current_lead, resolution.starting_goal, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> PredictorSettings {
        PredictorSettings::default()
    }

    #[test]
    fn test_zero_lead_is_informational() {
        let outcome = estimate_no_more_hits(10.0, 0.0, 3000.0, &settings()).unwrap();
        assert_eq!(outcome, NoMoreHitsOutcome::ZeroLead);
    }

    #[test]
    fn test_finds_first_whole_hour_at_or_below_lead() {
        // 3000 * 0.99^n <= 1500 first holds at n = 69
        let outcome = estimate_no_more_hits(30.5, 1500.0, 3000.0, &settings()).unwrap();

        match outcome {
            NoMoreHitsOutcome::Ends {
                end_hour,
                hours_remaining,
                target_at_end,
            } => {
                assert_eq!(end_hour, 93.5);
                assert_eq!(hours_remaining, 63.0);
                assert!(target_at_end <= 1500.0);
            }
            NoMoreHitsOutcome::ZeroLead => panic!("expected a crossing"),
        }
    }

    #[test]
    fn test_uses_lead_magnitude() {
        let ahead = estimate_no_more_hits(30.0, 1500.0, 3000.0, &settings()).unwrap();
        let behind = estimate_no_more_hits(30.0, -1500.0, 3000.0, &settings()).unwrap();
        assert_eq!(ahead, behind);
    }

    #[test]
    fn test_lead_already_past_target() {
        let outcome = estimate_no_more_hits(50.0, 4000.0, 3000.0, &settings()).unwrap();
        assert!(matches!(
            outcome,
            NoMoreHitsOutcome::Ends { hours_remaining, .. } if hours_remaining == 0.0
        ));
    }

    #[test]
    fn test_tiny_lead_cannot_be_resolved() {
        assert_eq!(
            estimate_no_more_hits(30.0, 1.0, 1.0e9, &settings()),
            Err(PredictionError::DecayCannotResolve { bound_hours: 1000 })
        );
    }

    #[test]
    fn test_huge_hour_ends_immediately() {
        let hour = 2_147_483_700.0;
        let outcome = estimate_no_more_hits(hour, 100.0, 3000.0, &settings()).unwrap();

        assert!(matches!(
            outcome,
            NoMoreHitsOutcome::Ends { hours_remaining, .. } if hours_remaining == 0.0
        ));
    }

    #[test]
    fn test_rejects_non_positive_hour() {
        assert!(matches!(
            estimate_no_more_hits(0.0, 100.0, 3000.0, &settings()),
            Err(PredictionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_inferred_goal_path() {
        let config = settings();
        let target = decayed_target(3000.0, 30.5, &config);

        let source = GoalSource::inferred(target);
        let inferred = estimate_no_more_hits_from(30.5, 1500.0, &source, &config).unwrap();
        let explicit = estimate_no_more_hits(30.5, 1500.0, 3000.0, &config).unwrap();

        match (inferred, explicit) {
            (
                NoMoreHitsOutcome::Ends { end_hour: a, .. },
                NoMoreHitsOutcome::Ends { end_hour: b, .. },
            ) => assert_eq!(a, b),
            _ => panic!("expected crossings"),
        }
    }
}
