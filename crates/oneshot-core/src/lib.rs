//! Core of the one-shot planner: request payload, scenario detection, plan
//! documents and the embedded plan catalog.
//!
//! Everything in this crate is pure. The HTTP surface lives in `oneshot-cli`.

pub mod plan;
pub mod request;

pub use plan::{PlanCatalog, PlanDocument, Scenario, dispatch};
pub use request::{FieldText, PlanRequest};
