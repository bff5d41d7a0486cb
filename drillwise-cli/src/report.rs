//! Report rendering for drill runs: console, JSON, and markdown.
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use drillwise_engine::{BadgeTier, StepStatus};

/// One applied choice in the recorded run.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub node_id: String,
    pub choice_text: String,
    pub xp_delta: i32,
    pub feedback: String,
}

/// One best-path step annotated with how the run tracked it.
#[derive(Debug, Clone, Serialize)]
pub struct BestStepRecord {
    pub node_id: String,
    pub choice_text: Option<String>,
    pub status: StepStatus,
}

/// Everything a finished run reports.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub scenario: String,
    pub steps: Vec<StepRecord>,
    pub final_node: String,
    pub accumulated_score: i32,
    pub percentage: i32,
    pub passed: bool,
    pub badge: BadgeTier,
    pub badge_label: Option<String>,
    pub best_path: Vec<BestStepRecord>,
}

const fn status_symbol(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Followed => "✔",
        StepStatus::Deviated => "↷",
        StepStatus::Missed => "✖",
    }
}

pub fn render_console(report: &RunReport) -> String {
    let mut out = String::new();
    let push = |out: &mut String, line: String| {
        out.push_str(&line);
        out.push('\n');
    };

    push(&mut out, String::new());
    push(
        &mut out,
        format!("{} {}", "📋 Drill Report".bright_cyan().bold(), report.scenario.bold()),
    );
    push(&mut out, "==============================".cyan().to_string());

    for step in &report.steps {
        let delta = if step.xp_delta >= 0 {
            format!("{:+}", step.xp_delta).green()
        } else {
            format!("{:+}", step.xp_delta).red()
        };
        push(
            &mut out,
            format!("  {} [{delta}] {}", step.node_id.bold(), step.choice_text),
        );
        if !step.feedback.is_empty() {
            push(&mut out, format!("      {}", step.feedback.dimmed()));
        }
    }
    push(&mut out, format!("  ends at {}", report.final_node.bold()));
    push(&mut out, String::new());

    let verdict = if report.passed {
        "PASSED".green().bold()
    } else {
        "FAILED".red().bold()
    };
    push(
        &mut out,
        format!(
            "Score: {} xp → {}%  {verdict}",
            report.accumulated_score, report.percentage
        ),
    );
    let badge = report
        .badge_label
        .clone()
        .unwrap_or_else(|| report.badge.to_string());
    push(&mut out, format!("Badge: {}", badge.bright_yellow()));
    push(&mut out, String::new());

    push(
        &mut out,
        "🧭 Path to a perfect score".bright_yellow().bold().to_string(),
    );
    for step in &report.best_path {
        let symbol = match step.status {
            StepStatus::Followed => status_symbol(step.status).green(),
            StepStatus::Deviated => status_symbol(step.status).yellow(),
            StepStatus::Missed => status_symbol(step.status).red(),
        };
        let choice = step
            .choice_text
            .as_deref()
            .map_or_else(String::new, |text| format!(" — {text}"));
        push(&mut out, format!("  {symbol} {}{choice}", step.node_id));
    }

    out
}

/// # Errors
///
/// Returns an error if the report cannot be serialized.
pub fn render_json(report: &RunReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render_markdown(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Drill Report: {}\n\n", report.scenario));

    out.push_str("## Run\n\n");
    for step in &report.steps {
        out.push_str(&format!(
            "- `{}` **{}** ({:+} xp)\n",
            step.node_id, step.choice_text, step.xp_delta
        ));
    }
    out.push_str(&format!("- ends at `{}`\n\n", report.final_node));

    out.push_str("## Result\n\n");
    out.push_str(&format!("- **Score**: {} xp\n", report.accumulated_score));
    out.push_str(&format!("- **Percentage**: {}%\n", report.percentage));
    out.push_str(&format!(
        "- **Outcome**: {}\n",
        if report.passed { "passed" } else { "failed" }
    ));
    let badge = report
        .badge_label
        .clone()
        .unwrap_or_else(|| report.badge.to_string());
    out.push_str(&format!("- **Badge**: {badge}\n\n"));

    out.push_str("## Path to a perfect score\n\n");
    for step in &report.best_path {
        let choice = step
            .choice_text
            .as_deref()
            .map_or_else(String::new, |text| format!(" — {text}"));
        out.push_str(&format!(
            "- {} `{}`{choice}\n",
            status_symbol(step.status),
            step.node_id
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunReport {
        RunReport {
            scenario: "Office Fire Drill".to_string(),
            steps: vec![StepRecord {
                node_id: "start".to_string(),
                choice_text: "raise the alarm".to_string(),
                xp_delta: 15,
                feedback: "Good call.".to_string(),
            }],
            final_node: "end_safe".to_string(),
            accumulated_score: 15,
            percentage: 100,
            passed: true,
            badge: BadgeTier::Expert,
            badge_label: Some("Fire Marshal".to_string()),
            best_path: vec![
                BestStepRecord {
                    node_id: "start".to_string(),
                    choice_text: Some("raise the alarm".to_string()),
                    status: StepStatus::Followed,
                },
                BestStepRecord {
                    node_id: "end_safe".to_string(),
                    choice_text: None,
                    status: StepStatus::Followed,
                },
            ],
        }
    }

    #[test]
    fn json_report_round_trips_fields() {
        let rendered = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["percentage"], 100);
        assert_eq!(value["badge"], "expert");
        assert_eq!(value["best_path"][1]["status"], "followed");
    }

    #[test]
    fn markdown_report_names_the_scenario_and_badge() {
        let rendered = render_markdown(&sample());
        assert!(rendered.contains("# Drill Report: Office Fire Drill"));
        assert!(rendered.contains("**Badge**: Fire Marshal"));
        assert!(rendered.contains("`end_safe`"));
    }

    #[test]
    fn console_report_contains_verdict_and_path() {
        colored::control::set_override(false);
        let rendered = render_console(&sample());
        assert!(rendered.contains("PASSED"));
        assert!(rendered.contains("Path to a perfect score"));
        colored::control::unset_override();
    }
}
