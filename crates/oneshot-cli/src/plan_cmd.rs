//! `oneshot plan`: build a plan document without starting the server.

use std::fmt::Write as _;
use std::io::Write as _;

use anyhow::{Context, Result};
use clap::ValueEnum;

use oneshot_core::{PlanCatalog, PlanDocument, PlanRequest, dispatch};

/// Output format for `oneshot plan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlanFormat {
    /// Pretty-printed JSON, identical in content to the HTTP response.
    Json,
    /// Human-readable checklist.
    Text,
}

/// Build the plan for `request` and write it to `output` (or stdout).
pub fn run_plan(
    catalog: &PlanCatalog,
    request: &PlanRequest,
    format: PlanFormat,
    output: Option<&str>,
) -> Result<()> {
    let plan = dispatch(catalog, request);
    let rendered = match format {
        PlanFormat::Json => {
            serde_json::to_string_pretty(&plan).context("failed to serialize plan")? + "\n"
        }
        PlanFormat::Text => render_text(&plan),
    };

    if let Some(path) = output {
        std::fs::write(path, &rendered)
            .with_context(|| format!("cannot write output file: {path}"))?;
        println!("Wrote {} plan to {path}", plan.scenario());
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
    }

    Ok(())
}

/// Render a plan document as a plain-text checklist.
pub fn render_text(plan: &PlanDocument) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", plan.title());
    let _ = writeln!(out, "{}", "=".repeat(plan.title().chars().count()));
    let _ = writeln!(out, "{}", plan.summary());

    match plan {
        PlanDocument::Orientation(sheet) => {
            out.push('\n');
            for (i, item) in sheet.action_sheet.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{}. {} [{}] ~{} min",
                    i + 1,
                    item.task,
                    item.auto_navigation.status,
                    item.estimated_time_minutes
                );
                let _ = writeln!(out, "   why:   {}", item.why);
                if !item.needs_from_you.is_empty() {
                    let _ = writeln!(out, "   needs: {}", item.needs_from_you.join(", "));
                }
            }
            let _ = writeln!(
                out,
                "\nTotal: {} tasks, ~{} min",
                sheet.action_sheet.len(),
                sheet.total_estimated_minutes()
            );

            if !sheet.information_to_confirm.is_empty() {
                let _ = writeln!(out, "\nPlease confirm:");
                for info in &sheet.information_to_confirm {
                    let _ = writeln!(out, "  - {} ({})", info.item, info.reason);
                }
            }

            if !sheet.references.is_empty() {
                let _ = writeln!(out, "\nReferences:");
                for reference in &sheet.references {
                    let _ = writeln!(out, "  - {}: {}", reference.title, reference.url);
                }
            }

            let _ = writeln!(out, "\n{}", sheet.confirmation_prompt);
        }
        PlanDocument::Fallback(fallback) => {
            if !fallback.echo.is_empty() {
                let _ = writeln!(out, "\nYou asked: {}", fallback.echo);
            }
            let _ = writeln!(out, "\nNext: {}", fallback.next_step);
        }
    }

    out
}
