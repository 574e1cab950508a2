mod assign;
mod audit;
mod company;
mod project;
mod report;
mod schedule;
mod sub_project;
mod task;

pub use assign::AssignCommands;
pub use audit::AuditArgs;
pub use company::CompanyCommands;
pub use project::ProjectCommands;
pub use report::ReportCommands;
pub use schedule::ScheduleCommands;
pub use sub_project::SubProjectCommands;
pub use task::TaskCommands;
