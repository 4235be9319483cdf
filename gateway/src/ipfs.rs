use axum::extract::State;
use http::Uri;
use tracing::instrument;

use crate::{AppState, GatewayResponse};

/// Handles everything below `/ipfs/`.
///
/// The raw path is used instead of a [axum::extract::Path], as segments are
/// percent-decoded individually while parsing it.
#[instrument(skip_all, fields(path = %uri.path()))]
pub async fn get(uri: Uri, State(AppState { node_service }): State<AppState>) -> GatewayResponse {
    crate::get_response(&*node_service, uri.path()).await
}
