//! Embedded plan catalog.
//!
//! The constant parts of the orientation command sheet are authored in
//! `orientation.toml` and compiled into the binary. The catalog is parsed and
//! validated once at startup; request handling only clones from it.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use super::document::{
    ActionItem, Automation, ConfirmationItem, Negotiation, OrientationPlan, PLAN_MODE, Reference,
};

/// The embedded orientation sheet TOML.
static ORIENTATION_TOML: &str = include_str!("orientation.toml");

/// Errors raised while loading or validating catalog content.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("action sheet must contain at least one item")]
    EmptyActionSheet,

    #[error("duplicate action sheet task: {0:?}")]
    DuplicateTask(String),

    #[error("task {0:?} has no estimated time")]
    MissingEstimate(String),

    #[error("reference {title:?} has a non-https url {url:?}")]
    InsecureReference { title: String, url: String },
}

/// Constant content of the orientation sheet, everything except the summary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrientationTemplate {
    pub title: String,
    pub confirmation_prompt: String,
    pub assumptions: Vec<String>,
    pub information_to_confirm: Vec<ConfirmationItem>,
    pub action_sheet: Vec<ActionItem>,
    pub automations_ready: Vec<Automation>,
    pub agent_to_agent_negotiations: Vec<Negotiation>,
    pub references: Vec<Reference>,
}

/// All pre-authored plan content known to the planner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanCatalog {
    orientation: OrientationTemplate,
}

impl PlanCatalog {
    /// Parse and validate the embedded catalog.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_toml(ORIENTATION_TOML)
    }

    /// Parse and validate orientation content from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let orientation: OrientationTemplate = toml::from_str(content)?;
        validate(&orientation)?;
        Ok(Self { orientation })
    }

    pub fn orientation(&self) -> &OrientationTemplate {
        &self.orientation
    }

    /// Instantiate the orientation sheet for one caller.
    pub fn orientation_plan(&self, preferred_name: &str, term: &str) -> OrientationPlan {
        let t = &self.orientation;
        OrientationPlan {
            mode: PLAN_MODE.to_string(),
            title: t.title.clone(),
            summary: orientation_summary(preferred_name, term),
            assumptions: t.assumptions.clone(),
            information_to_confirm: t.information_to_confirm.clone(),
            action_sheet: t.action_sheet.clone(),
            automations_ready: t.automations_ready.clone(),
            agent_to_agent_negotiations: t.agent_to_agent_negotiations.clone(),
            confirmation_prompt: t.confirmation_prompt.clone(),
            references: t.references.clone(),
        }
    }
}

fn orientation_summary(preferred_name: &str, term: &str) -> String {
    format!(
        "Hi {preferred_name}, I can finish the UCLA post-arrival orientation setup for the {term}. \
         Everything is consolidated into this one confirmation sheet\u{2014}no back-and-forth chat needed."
    )
}

fn validate(template: &OrientationTemplate) -> Result<(), CatalogError> {
    if template.action_sheet.is_empty() {
        return Err(CatalogError::EmptyActionSheet);
    }

    let mut seen = HashSet::new();
    for item in &template.action_sheet {
        if !seen.insert(item.task.as_str()) {
            return Err(CatalogError::DuplicateTask(item.task.clone()));
        }
        if item.estimated_time_minutes == 0 {
            return Err(CatalogError::MissingEstimate(item.task.clone()));
        }
    }

    for reference in &template.references {
        if !reference.url.starts_with("https://") {
            return Err(CatalogError::InsecureReference {
                title: reference.title.clone(),
                url: reference.url.clone(),
            });
        }
    }

    Ok(())
}
