//! API route handlers, one module per resource.

pub mod assignments;
pub mod audit;
pub mod companies;
pub mod health;
pub mod projects;
pub mod reports;
pub mod schedule;
pub mod sub_projects;
pub mod tasks;
