use axum::{routing::get, Router};
use cidgate_castore::nodeservice::NodeService;
use std::sync::Arc;

mod directory;
mod errors;
mod ipfs;
pub mod mime;
pub mod path;
pub mod resolver;
pub mod response;

#[cfg(test)]
mod tests;

pub use errors::Error;
pub use path::ContentPath;
pub use response::{Body, GatewayResponse};

#[derive(Clone)]
pub struct AppState {
    node_service: Arc<dyn NodeService>,
}

impl AppState {
    pub fn new(node_service: Arc<dyn NodeService>) -> Self {
        Self { node_service }
    }
}

pub fn gen_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/ipfs/*path", get(ipfs::get))
}

async fn root() -> &'static str {
    "Hello from cidgate"
}

/// Serves a single request path, like `/ipfs/<cid>/some/file.txt`.
///
/// This never fails, every error is turned into a [GatewayResponse] with the
/// matching status code.
pub async fn get_response(node_service: &dyn NodeService, path: &str) -> GatewayResponse {
    let path = match path.parse::<ContentPath>() {
        Ok(path) => path,
        Err(e) => return response::from_error(e),
    };

    let resolved = resolver::resolve(node_service, &path).await;

    response::build(resolved, &path)
}
