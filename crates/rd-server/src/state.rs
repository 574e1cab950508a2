//! Shared state handed to every handler.

use axum::http::HeaderMap;
use rd_db::service::RdService;

use crate::ACTOR_HEADER;

pub struct AppState {
    pub service: RdService,
    /// Actor recorded when a request carries no actor header.
    pub default_actor: String,
    /// Page size for list endpoints without `?limit=`.
    pub default_limit: u32,
}

impl AppState {
    #[must_use]
    pub fn new(service: RdService, default_actor: impl Into<String>, default_limit: u32) -> Self {
        Self {
            service,
            default_actor: default_actor.into(),
            default_limit,
        }
    }

    /// Resolve the acting user from the request headers.
    #[must_use]
    pub fn actor(&self, headers: &HeaderMap) -> String {
        headers
            .get(ACTOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map_or_else(|| self.default_actor.clone(), String::from)
    }

    #[must_use]
    pub fn limit(&self, requested: Option<u32>) -> u32 {
        requested.filter(|l| *l > 0).unwrap_or(self.default_limit)
    }
}
