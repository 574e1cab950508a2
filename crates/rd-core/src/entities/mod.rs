//! Entity structs for the delivery workflow.
//!
//! Each entity maps to a table in the libSQL store (see `rd-db/migrations`).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation.

mod assignment;
mod audit;
mod company;
mod project;
mod report;
mod schedule;
mod sub_project;
mod task;

pub use assignment::CompanyAssignment;
pub use audit::AuditEntry;
pub use company::Company;
pub use project::Project;
pub use report::{EvaluationReport, ReportScores, ReportTexts};
pub use schedule::TaskDateOverride;
pub use sub_project::SubProject;
pub use task::Task;
