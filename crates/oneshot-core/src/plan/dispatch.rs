//! Scenario detection and plan dispatch.

use std::fmt;

use crate::request::PlanRequest;

use super::catalog::PlanCatalog;
use super::document::{FallbackPlan, PlanDocument};

/// Substrings that must all appear in the description to select the
/// orientation sheet.
pub const ORIENTATION_TRIGGERS: [&str; 2] = ["ucla", "orientation"];

/// The scenario a request was matched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    UclaOrientation,
    Unrecognized,
}

impl Scenario {
    /// Classify an already lower-cased description by plain substring tests.
    pub fn detect(description: &str) -> Self {
        if ORIENTATION_TRIGGERS
            .iter()
            .all(|trigger| description.contains(trigger))
        {
            Self::UclaOrientation
        } else {
            Self::Unrecognized
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::UclaOrientation => "ucla_orientation",
            Self::Unrecognized => "unrecognized",
        };
        f.write_str(s)
    }
}

/// Build the plan document for a request.
pub fn dispatch(catalog: &PlanCatalog, request: &PlanRequest) -> PlanDocument {
    let scenario = Scenario::detect(&request.description());
    tracing::debug!(%scenario, "dispatching plan request");

    match scenario {
        Scenario::UclaOrientation => PlanDocument::Orientation(
            catalog.orientation_plan(request.preferred_name(), request.term()),
        ),
        Scenario::Unrecognized => PlanDocument::Fallback(FallbackPlan::for_echo(request.echo())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_requires_both_triggers() {
        assert_eq!(Scenario::detect("ucla orientation"), Scenario::UclaOrientation);
        assert_eq!(Scenario::detect("orientation week at ucla"), Scenario::UclaOrientation);
        assert_eq!(Scenario::detect("ucla"), Scenario::Unrecognized);
        assert_eq!(Scenario::detect("orientation"), Scenario::Unrecognized);
        assert_eq!(Scenario::detect(""), Scenario::Unrecognized);
    }

    #[test]
    fn detect_is_plain_substring() {
        // No word boundaries: embedded matches still count.
        assert_eq!(Scenario::detect("xuclax reorientations"), Scenario::UclaOrientation);
    }

    #[test]
    fn detect_expects_lowercase_input() {
        assert_eq!(Scenario::detect("UCLA Orientation"), Scenario::Unrecognized);
    }

    #[test]
    fn triggers_may_span_fields() {
        let catalog = PlanCatalog::load().unwrap();
        let req = PlanRequest {
            goal: Some("finish Orientation".into()),
            problem: Some("new at UCLA".into()),
            ..Default::default()
        };
        assert!(matches!(dispatch(&catalog, &req), PlanDocument::Orientation(_)));
    }

    #[test]
    fn name_and_term_do_not_trigger() {
        let catalog = PlanCatalog::load().unwrap();
        let req = PlanRequest {
            preferred_name: Some("ucla".into()),
            term: Some("orientation".into()),
            ..Default::default()
        };
        assert!(matches!(dispatch(&catalog, &req), PlanDocument::Fallback(_)));
    }

    #[test]
    fn scenario_display() {
        assert_eq!(Scenario::UclaOrientation.to_string(), "ucla_orientation");
        assert_eq!(Scenario::Unrecognized.to_string(), "unrecognized");
    }
}
