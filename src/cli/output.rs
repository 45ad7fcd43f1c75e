//! CLI output formatting.

use std::fmt::Display;

use owo_colors::OwoColorize;
use tabled::Tabled;

use crate::core::domain::Prediction;

/// Print the application header.
pub fn header(version: &str) {
    println!("{} {}", "marketcast".bold(), version.dimmed());
    println!();
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    println!("  {:<14} {}", label.dimmed(), value);
}

/// Print a success line.
pub fn success(message: &str) {
    println!("  {} {}", "✓".green(), message);
}

/// Print a warning line.
pub fn warning(message: &str) {
    println!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line.
pub fn error(message: &str) {
    eprintln!("  {} {}", "×".red(), message);
}

/// Print a section header.
pub fn section(title: &str) {
    println!();
    println!("{}", title.bold());
}

/// Start a progress spinner.
pub fn spinner(message: &str) -> indicatif::ProgressBar {
    let pb = indicatif::ProgressBar::new_spinner();
    pb.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Finish a spinner with success.
pub fn spinner_success(pb: &indicatif::ProgressBar, message: &str) {
    pb.finish_with_message(format!("{} {}", "✓".green(), message));
}

/// Finish a spinner with failure.
pub fn spinner_fail(pb: &indicatif::ProgressBar, message: &str) {
    pb.finish_with_message(format!("{} {}", "×".red(), message));
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "outcome")]
    name: String,
    #[tabled(rename = "model only")]
    model_only: String,
    #[tabled(rename = "blended")]
    blended: String,
    #[tabled(rename = "models")]
    model_count: usize,
    #[tabled(rename = "disagreement")]
    disagreement: String,
}

fn format_pct(value: Option<f64>) -> String {
    value.map(|p| format!("{p:.1}%")).unwrap_or_else(|| "—".to_string())
}

/// Render a prediction as a human-readable summary table.
pub fn print_prediction(prediction: &Prediction) {
    section(&prediction.event.question);
    field("Category", format!("{:?}", prediction.event.category));
    field("Family", format!("{:?}", prediction.event.family_type));
    field("Classified because", &prediction.event.classification_reason);

    if let Some(notice) = &prediction.low_probability_notice {
        warning(&format!(
            "low-probability short-circuit: max candidate {:.2}% below threshold {:.2}%",
            notice.max_candidate, notice.threshold
        ));
        return;
    }

    if prediction.event.is_mock {
        warning("event data could not be resolved from any market source; showing a mock event");
    }

    if prediction.timed_out {
        warning("overall deadline expired before every outcome finished fusing");
    }

    let rows: Vec<OutcomeRow> = prediction
        .outcomes
        .iter()
        .map(|o| OutcomeRow {
            name: o.outcome_name.clone(),
            model_only: format_pct(o.model_only_prob),
            blended: format_pct(o.blended_prob),
            model_count: o.model_count,
            disagreement: format!("{:.2}", o.disagreement),
        })
        .collect();

    println!();
    println!("{}", tabled::Table::new(rows));

    if let Some(signal) = &prediction.trade_signal {
        section("Trade signal");
        field("Signal", format!("{:?}", signal.signal));
        field("EV", format!("{:.1} pts", signal.ev));
        field("Annualized EV", format!("{:.1} pts/yr", signal.annualized_ev));
        field("Risk factor", format!("{:.2}", signal.risk_factor));
        field("Reason", &signal.reason);
    }
}

/// Print a prediction as raw JSON.
pub fn print_prediction_json(prediction: &Prediction) -> crate::error::Result<()> {
    println!("{}", serde_json::to_string_pretty(prediction)?);
    Ok(())
}
