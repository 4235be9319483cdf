use async_trait::async_trait;
use bytes::Bytes;
use std::io;

use crate::{Cid, Directory, Error, Node};

mod from_addr;
mod memory;


pub use self::from_addr::from_addr;
pub use self::memory::MemoryNodeService;

/// The query interface all node backends need to implement.
///
/// This is the only way the gateway talks to content-addressed storage:
/// given a [Cid], return the [Node] it addresses.
/// Retries, caching and verification of the content are the concern of the
/// implementation, not of its callers.
#[async_trait]
pub trait NodeService: Send + Sync {
    /// Looks up a single [Node] by its [Cid].
    /// In case the node is not found, Ok(None) is returned.
    /// For files, the returned reader must not have been read from yet.
    async fn get_node(&self, address: &Cid) -> Result<Option<Node>, Error>;
}

#[async_trait]
impl<A> NodeService for A
where
    A: AsRef<dyn NodeService> + Send + Sync,
{
    async fn get_node(&self, address: &Cid) -> Result<Option<Node>, Error> {
        self.as_ref().get_node(address).await
    }
}

/// The write side of a backend, used to populate it.
///
/// The [Cid] of an inserted node is chosen by the backend, and derived from
/// its contents.
#[async_trait]
pub trait NodeWriter: Send + Sync {
    /// Inserts the contents of a file.
    async fn put_blob(&self, contents: Bytes) -> Result<Cid, Error>;

    /// Inserts a [Directory]. Its entries don't need to exist yet.
    async fn put_directory(&self, directory: Directory) -> Result<Cid, Error>;
}

#[async_trait]
impl<A> NodeWriter for A
where
    A: AsRef<dyn NodeWriter> + Send + Sync,
{
    async fn put_blob(&self, contents: Bytes) -> Result<Cid, Error> {
        self.as_ref().put_blob(contents).await
    }

    async fn put_directory(&self, directory: Directory) -> Result<Cid, Error> {
        self.as_ref().put_directory(directory).await
    }
}

/// BlobReader is a [tokio::io::AsyncRead] over the contents of a file node.
pub trait BlobReader: tokio::io::AsyncRead + Send + Unpin + 'static {}

/// In-memory contents can be used as a BlobReader.
impl BlobReader for io::Cursor<&'static [u8]> {}
impl BlobReader for io::Cursor<Bytes> {}
