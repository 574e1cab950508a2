//! Response types returned as JSON by the HTTP API and the `rdy` CLI.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::progress::TaskCompletion;

/// Response from `CompanyProgress`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CompanyProgressResponse {
    pub sub_project_id: String,
    pub company_id: String,
    pub percentage: u8,
    pub completion: TaskCompletion,
}

/// Response from `IsReportEligible`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EligibilityResponse {
    pub sub_project_id: String,
    pub company_id: String,
    pub eligible: bool,
    pub completion: TaskCompletion,
}
