//! The content-addressed side of cidgate.
//!
//! This holds the node model ([Node], [Directory], [DirectoryEntry]), the
//! narrow query interface backends implement ([nodeservice::NodeService]),
//! an in-memory backend, and an importer populating it from a filesystem.
mod cid;
mod component;
mod digests;
mod errors;
mod nodes;

pub mod fixtures;
pub mod import;
pub mod nodeservice;

pub use cid::{Cid, CidError};
pub use component::{ComponentError, PathComponent};
pub use digests::{B3Digest, B3_LEN};
pub use errors::Error;
pub use nodes::{Directory, DirectoryEntry, DirectoryError, Node};
