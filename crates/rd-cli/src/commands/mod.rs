pub mod assign;
pub mod audit;
pub mod company;
pub mod dispatch;
pub mod project;
pub mod report;
pub mod schedule;
pub mod schema;
pub mod serve;
pub mod shared;
pub mod sub_project;
pub mod task;
