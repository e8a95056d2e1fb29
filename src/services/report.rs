use colored::Colorize;

use super::forecasting::ForecastReport;
use crate::api::LiveWarData;
use crate::history::RaceLog;
use crate::prediction::NoMoreHitsOutcome;

pub fn render_forecast(report: &ForecastReport) -> String {
    let result = &report.forecast.result;
    let mut out = String::new();

    out.push_str(&format!("{}\n", "War Forecast".bold()));
    out.push_str(&format!(
        "War ends at hour {} (in {:.1}h)\n",
        format!("{:.1}", result.war_end_hour).bold(),
        result.hours_remaining
    ));
    out.push_str(&format!("Starting target: {:.0}\n", report.forecast.starting_goal));
    if let Some(inferred) = report.forecast.inferred_goal {
        out.push_str(&format!("Inferred starting target: {:.0}\n", inferred));
    }
    out.push_str(&format!("Target right now: {:.1}\n", report.forecast.current_target));
    out.push_str("Final scores:\n");
    out.push_str(&format!("  You: {}\n", result.your_final_score.to_string().bold()));
    out.push_str(&format!(
        "  Opponent: {}\n",
        result.opponent_final_score.to_string().bold()
    ));
    out.push_str(&format!("Final lead: {}\n", colored_lead(result.final_lead)));
    if let Some(entries) = report.logged_entries {
        let logged = format!("Logged ({} entries this war)", entries);
        out.push_str(&format!("{}\n", logged.dimmed()));
    }

    out
}

pub fn render_live_header(live: &LiveWarData) -> String {
    let [yours, theirs] = &live.identity.participants;
    format!(
        "{} vs {} (war {})\nWar duration: {} hours\nCurrent score: {} | Lead: {}\n",
        yours.bold(),
        theirs.bold(),
        live.identity.race_id,
        live.current_hour,
        live.your_score,
        colored_lead(live.current_lead as i64)
    )
}

pub fn render_no_more_hits(outcome: &NoMoreHitsOutcome) -> String {
    match outcome {
        NoMoreHitsOutcome::Ends {
            end_hour,
            hours_remaining,
            target_at_end,
        } => format!(
            "With no more hits the war ends at hour {} (in {:.1}h), target {:.1}\n",
            format!("{:.1}", end_hour).bold(),
            hours_remaining,
            target_at_end
        ),
        NoMoreHitsOutcome::ZeroLead => format!(
            "{}\n",
            "Lead is zero, decay alone cannot resolve it".yellow()
        ),
    }
}

pub fn render_history(log: Option<&RaceLog>) -> String {
    let Some(log) = log else {
        return "No war history recorded yet\n".to_string();
    };

    let mut out = format!(
        "{} vs {} (war {}), {} entries\n",
        log.participants[0].bold(),
        log.participants[1].bold(),
        log.race_id,
        log.history.len()
    );
    for entry in &log.history {
        out.push_str(&format!(
            "  hour {:>6.1} | score {:>8.0} | lead {:>7.0} | target {:>6.0} | end {:>6.1}\n",
            entry.current_hour, entry.your_score, entry.lead, entry.target, entry.predicted_end
        ));
    }
    if let Some(latest) = log.latest() {
        out.push_str(&format!(
            "Latest prediction: war ends at hour {}\n",
            format!("{:.1}", latest.predicted_end).bold()
        ));
    }
    out
}

fn colored_lead(lead: i64) -> colored::ColoredString {
    let text = lead.to_string();
    if lead > 0 {
        text.green()
    } else if lead < 0 {
        text.red()
    } else {
        text.yellow()
    }
}
