//! Plan document types.
//!
//! These map directly to the JSON returned by `POST /one-shot-plan`. Field
//! order in each struct is the order of keys in the serialized document.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::dispatch::Scenario;

/// Value of the `mode` key in every plan document.
pub const PLAN_MODE: &str = "ask-once-no-chat-demo";

/// Title of the fallback document.
pub const FALLBACK_TITLE: &str = "One-shot automation placeholder";

const FALLBACK_SUMMARY: &str = "Provide more detail about the process you want automated so I can \
                                compile a single confirmation sheet.";

const FALLBACK_NEXT_STEP: &str =
    "Describe the target service (e.g., university task, travel booking, billing issue).";

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// One of the two documents the planner can return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanDocument {
    Orientation(OrientationPlan),
    Fallback(FallbackPlan),
}

impl PlanDocument {
    /// The scenario this document answers.
    pub fn scenario(&self) -> Scenario {
        match self {
            Self::Orientation(_) => Scenario::UclaOrientation,
            Self::Fallback(_) => Scenario::Unrecognized,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Orientation(plan) => &plan.title,
            Self::Fallback(plan) => &plan.title,
        }
    }

    pub fn summary(&self) -> &str {
        match self {
            Self::Orientation(plan) => &plan.summary,
            Self::Fallback(plan) => &plan.summary,
        }
    }
}

/// The detailed command sheet for UCLA post-arrival orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientationPlan {
    pub mode: String,
    pub title: String,
    pub summary: String,
    pub assumptions: Vec<String>,
    pub information_to_confirm: Vec<ConfirmationItem>,
    pub action_sheet: Vec<ActionItem>,
    pub automations_ready: Vec<Automation>,
    pub agent_to_agent_negotiations: Vec<Negotiation>,
    pub confirmation_prompt: String,
    pub references: Vec<Reference>,
}

impl OrientationPlan {
    /// Sum of the estimated minutes across the action sheet.
    pub fn total_estimated_minutes(&self) -> u32 {
        self.action_sheet
            .iter()
            .map(|item| item.estimated_time_minutes)
            .sum()
    }
}

/// Placeholder returned when the request matches no known scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackPlan {
    pub mode: String,
    pub title: String,
    pub summary: String,
    /// The caller's own description, echoed back.
    pub echo: String,
    pub next_step: String,
}

impl FallbackPlan {
    pub fn for_echo(echo: impl Into<String>) -> Self {
        Self {
            mode: PLAN_MODE.to_string(),
            title: FALLBACK_TITLE.to_string(),
            summary: FALLBACK_SUMMARY.to_string(),
            echo: echo.into(),
            next_step: FALLBACK_NEXT_STEP.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Orientation plan parts
// ---------------------------------------------------------------------------

/// A single entry in the action sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub task: String,
    pub why: String,
    pub auto_navigation: AutoNavigation,
    /// Documents or fields the user has to supply.
    pub needs_from_you: Vec<String>,
    pub estimated_time_minutes: u32,
}

/// Description of a simulated navigation step. Nothing is actually opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoNavigation {
    pub simulate: String,
    pub status: NavigationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationItem {
    pub item: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Automation {
    pub id: String,
    pub description: String,
    pub status: AutomationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Negotiation {
    pub counterparty: String,
    pub intent: String,
    pub status: NegotiationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    pub url: String,
}

// ---------------------------------------------------------------------------
// Status labels
// ---------------------------------------------------------------------------

/// Readiness of a simulated navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationStatus {
    ReadyToLaunch,
    AwaitingConfirmation,
    RequiresFinalAmount,
    WaitingForRecords,
}

impl fmt::Display for NavigationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ReadyToLaunch => "ready_to_launch",
            Self::AwaitingConfirmation => "awaiting_confirmation",
            Self::RequiresFinalAmount => "requires_final_amount",
            Self::WaitingForRecords => "waiting_for_records",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutomationStatus {
    AwaitingSingleTapApproval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationStatus {
    AutoEscalateIfNeeded,
}
