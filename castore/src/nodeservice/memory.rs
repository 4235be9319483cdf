use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;
use tracing::{instrument, warn, Span};

use super::{NodeService, NodeWriter};
use crate::{B3Digest, Cid, Directory, Error, Node};

#[derive(Clone)]
enum StoredNode {
    Blob(Bytes),
    Directory(Directory),
}

/// A [NodeService] keeping everything in a [HashMap].
///
/// Blobs and directories are addressed by [Cid::from_digest] over a
/// domain-separated blake3 digest, so inserting the same content twice yields
/// the same [Cid].
#[derive(Clone, Default)]
pub struct MemoryNodeService {
    db: Arc<RwLock<HashMap<Cid, StoredNode>>>,
}

impl MemoryNodeService {
    /// Inserts the contents of a file, and returns its [Cid].
    #[instrument(skip_all, fields(blob.size))]
    pub fn put_blob(&self, contents: impl Into<Bytes>) -> Cid {
        let contents = contents.into();
        Span::current().record("blob.size", contents.len());
        let digest: B3Digest = blake3::Hasher::new()
            .update(b"blob\0")
            .update(&contents)
            .finalize()
            .into();

        let cid = Cid::from_digest(&digest);
        self.db
            .write()
            .entry(cid.clone())
            .or_insert(StoredNode::Blob(contents));

        cid
    }

    /// Inserts a [Directory], and returns its [Cid].
    /// The entries of the directory are not checked to exist.
    #[instrument(skip_all, fields(directory.digest = %directory.digest()))]
    pub fn put_directory(&self, directory: Directory) -> Cid {
        let cid = Cid::from_digest(&directory.digest());
        self.db
            .write()
            .entry(cid.clone())
            .or_insert(StoredNode::Directory(directory));

        cid
    }
}

#[async_trait]
impl NodeService for MemoryNodeService {
    #[instrument(skip(self, address), fields(node.address = %address))]
    async fn get_node(&self, address: &Cid) -> Result<Option<Node>, Error> {
        let stored = match self.db.read().get(address) {
            None => return Ok(None),
            Some(stored) => stored.clone(),
        };

        Ok(Some(match stored {
            StoredNode::Blob(contents) => Node::File {
                size: contents.len() as u64,
                reader: Box::new(Cursor::new(contents)),
            },
            StoredNode::Directory(directory) => {
                // Validate the retrieved Directory indeed has the address we
                // expect it to have, to detect corruptions.
                let actual = Cid::from_digest(&directory.digest());
                if actual != *address {
                    warn!(directory.actual = %actual, "directory address mismatch");
                    return Err(Error::StorageError(format!(
                        "requested directory {}, but got {}",
                        address, actual
                    )));
                }
                Node::Directory(directory)
            }
        }))
    }
}

#[async_trait]
impl NodeWriter for MemoryNodeService {
    async fn put_blob(&self, contents: Bytes) -> Result<Cid, Error> {
        Ok(MemoryNodeService::put_blob(self, contents))
    }

    async fn put_directory(&self, directory: Directory) -> Result<Cid, Error> {
        Ok(MemoryNodeService::put_directory(self, directory))
    }
}
