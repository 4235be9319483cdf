use cidgate_castore::nodeservice::NodeService;
use cidgate_castore::Node;
use tracing::{instrument, warn};

use crate::path::ContentPath;
use crate::Error;

/// This descends from the root node of the given [ContentPath] through all of
/// its segments, returning the [Node] at the end.
///
/// Every segment costs one, strictly sequential, lookup in the
/// [NodeService]. Backend errors are returned as-is, without retrying.
#[instrument(skip(node_service, path), fields(path = %path), err)]
pub async fn resolve(node_service: &dyn NodeService, path: &ContentPath) -> Result<Node, Error> {
    let not_found = || Error::NotFound(path.to_string());

    let mut node = node_service
        .get_node(path.root())
        .await?
        .ok_or_else(not_found)?;

    for segment in path.segments() {
        let directory = match node {
            // There's still some path left, but the current node is no
            // directory. This means the path doesn't exist, as we can't reach
            // it. Dropping the node releases its reader.
            Node::File { .. } => return Err(not_found()),
            Node::Directory(directory) => directory,
        };

        let entry = directory.get(segment.as_ref()).ok_or_else(not_found)?;

        node = node_service
            .get_node(entry.address())
            .await?
            .ok_or_else(|| {
                // If we didn't get the node that's linked, that's a store
                // inconsistency, bail out!
                warn!(node.address = %entry.address(), "node does not exist");

                cidgate_castore::Error::StorageError(format!(
                    "node {} does not exist",
                    entry.address()
                ))
            })?;
    }

    // We traversed the entire path, so this must be the node.
    Ok(node)
}
