use ndarray::Array1;

use super::types::Hours;

/// Candidate hours `start, start + step, ...` strictly below `ceiling`
pub fn candidate_hours(start: Hours, ceiling: Hours, step: Hours) -> Array1<f64> {
    if step <= 0.0 || start >= ceiling {
        return Array1::zeros(0);
    }
    Array1::range(start, ceiling, step)
}

/// Index of the earliest candidate where `value >= threshold`
pub fn first_crossing(values: &Array1<f64>, thresholds: &Array1<f64>) -> Option<usize> {
    values
        .iter()
        .zip(thresholds.iter())
        .position(|(value, threshold)| value >= threshold)
}
