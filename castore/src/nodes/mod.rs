//! This holds types describing nodes in the cidgate castore model.
mod directory;

use std::fmt;

use crate::nodeservice::BlobReader;
pub use directory::{Directory, DirectoryEntry, DirectoryError};

/// A Node is either a file or a [Directory], as returned by a
/// [crate::nodeservice::NodeService] for a given [crate::Cid].
/// Nodes themselves don't have names, what gives them names is them
/// being referenced from a [DirectoryEntry].
pub enum Node {
    /// A file, with its contents available through a reader.
    File {
        /// The file contents. Pulled lazily from the backend, and only once.
        /// Dropping the node releases the reader.
        reader: Box<dyn BlobReader>,

        /// The file content size
        size: u64,
    },
    /// A list of named references to other nodes.
    Directory(Directory),
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::File { size, .. } => f.debug_struct("File").field("size", size).finish(),
            Node::Directory(directory) => f.debug_tuple("Directory").field(directory).finish(),
        }
    }
}
