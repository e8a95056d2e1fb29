use super::decay::{decayed_target, resolve_goal};
use super::errors::{PredictionError, Result};
use super::search::{candidate_hours, first_crossing};
use super::types::{CurvePoint, Forecast, Hours, PredictionResult, RaceSnapshot, Score};
use crate::config::settings::PredictorSettings;

/// Per-hour rates observed so far, assumed to hold for the rest of the race
#[derive(Debug, Clone, Copy)]
struct ObservedRates {
    lead_per_hour: f64,
    opponent_per_hour: f64,
    opponent_score: Score,
}

impl ObservedRates {
    fn from_snapshot(current_hour: Hours, current_lead: Score, your_score: Score) -> Self {
        let opponent_score = your_score - current_lead;
        Self {
            lead_per_hour: current_lead / current_hour,
            opponent_per_hour: opponent_score / current_hour,
            opponent_score,
        }
    }
}

/// Forecasts the hour at which the lead first reaches the decaying target.
///
/// Candidate hours are scanned in `step_hours` increments from `current_hour`
/// up to (not including) `search_ceiling_hours`; the earliest crossing wins.
/// Scores stay floating point until the result is built.
pub fn predict_war_end(
    current_hour: Hours,
    current_lead: Score,
    your_score: Score,
    starting_goal: Score,
    config: &PredictorSettings,
) -> Result<PredictionResult> {
    validate_hour(current_hour)?;
    validate_finite(current_lead, "current lead")?;
    validate_finite(your_score, "your score")?;
    validate_goal(starting_goal)?;

    let rates = ObservedRates::from_snapshot(current_hour, current_lead, your_score);
    let hours = candidate_hours(current_hour, config.search_ceiling_hours, config.step_hours);

    let lead_magnitudes = hours.mapv(|h| {
        projected_lead_magnitude(current_lead, rates.lead_per_hour, h - current_hour)
    });
    let targets = hours.mapv(|h| decayed_target(starting_goal, h, config));

    let end_index =
        first_crossing(&lead_magnitudes, &targets).ok_or(PredictionError::NoConvergence {
            ceiling_hours: config.search_ceiling_hours,
        })?;

    let end_hour = hours[end_index];
    let final_lead = lead_magnitudes[end_index].copysign(current_lead);

    Ok(build_result(current_hour, end_hour, final_lead, &rates))
}

/// Resolves the starting goal for a snapshot, then predicts
pub fn forecast(snapshot: &RaceSnapshot, config: &PredictorSettings) -> Result<Forecast> {
    validate_hour(snapshot.current_hour)?;

    let goal = resolve_goal(&snapshot.goal, snapshot.current_hour, config)?;
    let result = predict_war_end(
        snapshot.current_hour,
        snapshot.current_lead,
        snapshot.your_score,
        goal.starting_goal,
        config,
    )?;

    Ok(Forecast {
        result,
        starting_goal: goal.starting_goal,
        inferred_goal: goal.inferred_goal,
        current_target: decayed_target(goal.starting_goal, snapshot.current_hour, config),
    })
}

/// Lead and target sampled from `current_hour` through `until_hour + 1`,
/// using the same linear lead model as [`predict_war_end`].
pub fn project_curve(
    current_hour: Hours,
    current_lead: Score,
    starting_goal: Score,
    until_hour: Hours,
    config: &PredictorSettings,
) -> Result<Vec<CurvePoint>> {
    validate_hour(current_hour)?;
    validate_goal(starting_goal)?;

    let lead_per_hour = current_lead / current_hour;
    let hours = candidate_hours(current_hour, until_hour + 1.0, config.step_hours);

    Ok(hours
        .iter()
        .map(|&hour| CurvePoint {
            hour,
            lead: current_lead + lead_per_hour * (hour - current_hour),
            target: decayed_target(starting_goal, hour, config),
        })
        .collect())
}

// Extending a lead and growing a deficit are projected on magnitudes
// separately. Whether the losing side deserves a different model is unresolved.
fn projected_lead_magnitude(current_lead: Score, lead_per_hour: f64, elapsed: Hours) -> Score {
    if current_lead >= 0.0 {
        current_lead + lead_per_hour * elapsed
    } else {
        let deficit = -current_lead;
        let deficit_per_hour = -lead_per_hour;
        deficit + deficit_per_hour * elapsed
    }
}

fn build_result(
    current_hour: Hours,
    end_hour: Hours,
    final_lead: Score,
    rates: &ObservedRates,
) -> PredictionResult {
    let hours_remaining = end_hour - current_hour;
    let opponent_final = rates.opponent_score + rates.opponent_per_hour * hours_remaining;
    let your_final = opponent_final + final_lead;

    PredictionResult {
        war_end_hour: end_hour,
        hours_remaining,
        your_final_score: truncate(your_final),
        opponent_final_score: truncate(opponent_final),
        final_lead: truncate(final_lead),
    }
}

fn truncate(value: Score) -> i64 {
    value.trunc() as i64
}

pub(crate) fn validate_hour(current_hour: Hours) -> Result<()> {
    if current_hour.is_finite() && current_hour > 0.0 {
        Ok(())
    } else {
        Err(PredictionError::invalid(format!(
            "current hour must be greater than zero, got {current_hour}"
        )))
    }
}

pub(crate) fn validate_goal(starting_goal: Score) -> Result<()> {
    if starting_goal.is_finite() && starting_goal > 0.0 {
        Ok(())
    } else {
        Err(PredictionError::invalid(format!(
            "starting goal must be a positive number, got {starting_goal}"
        )))
    }
}

pub(crate) fn validate_finite(value: Score, what: &str) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PredictionError::invalid(format!("{what} must be a finite number")))
    }
}
