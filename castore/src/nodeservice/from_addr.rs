use std::sync::Arc;
use url::Url;

use super::{MemoryNodeService, NodeService, NodeWriter};
use crate::Error;

/// Constructs a new backend from an URI, returning its query and write sides.
/// Both of them refer to the same backend.
///
/// The following schemes are supported by the following services:
/// - `memory://` ([MemoryNodeService])
pub async fn from_addr(
    uri: &str,
) -> Result<(Arc<dyn NodeService>, Arc<dyn NodeWriter>), Error> {
    let url =
        Url::parse(uri).map_err(|e| Error::InvalidRequest(format!("unable to parse url: {}", e)))?;

    match url.scheme() {
        "memory" => {
            // memory doesn't support host or path in the URL.
            if url.has_host() || !url.path().is_empty() {
                return Err(Error::InvalidRequest("invalid url".to_string()));
            }
            let svc = Arc::new(MemoryNodeService::default());
            let node_service: Arc<dyn NodeService> = svc.clone();
            let node_writer: Arc<dyn NodeWriter> = svc;
            Ok((node_service, node_writer))
        }
        scheme => Err(Error::InvalidRequest(format!("unknown scheme: {}", scheme))),
    }
}
