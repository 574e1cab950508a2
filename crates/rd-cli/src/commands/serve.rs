use std::sync::Arc;

use rd_server::state::AppState;

use crate::cli::root_commands::ServeArgs;
use crate::context::AppContext;

/// Run the HTTP API until interrupted. Consumes the context: the server owns
/// the store for its lifetime.
pub async fn handle(args: &ServeArgs, ctx: AppContext) -> anyhow::Result<()> {
    let mut server = ctx.config.server.clone();
    if let Some(host) = &args.host {
        server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        server.port = port;
    }
    server.cors_enabled |= args.cors;

    tracing::info!(
        root = %ctx.project_root.display(),
        actor = %ctx.actor,
        "starting readiness API"
    );
    let state = Arc::new(AppState::new(
        ctx.service,
        ctx.actor,
        ctx.config.general.default_limit,
    ));
    rd_server::serve(&server, state).await
}
