//! Plan documents, the embedded catalog, and dispatch.

pub mod catalog;
pub mod dispatch;
pub mod document;

pub use catalog::{CatalogError, OrientationTemplate, PlanCatalog};
pub use dispatch::{ORIENTATION_TRIGGERS, Scenario, dispatch};
pub use document::{
    ActionItem, AutoNavigation, Automation, AutomationStatus, ConfirmationItem, FALLBACK_TITLE,
    FallbackPlan, NavigationStatus, Negotiation, NegotiationStatus, OrientationPlan, PLAN_MODE,
    PlanDocument, Reference,
};
