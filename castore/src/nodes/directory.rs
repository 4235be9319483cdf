use bstr::ByteSlice;

use crate::{B3Digest, Cid, PathComponent};

/// A named reference to another node, by its [Cid].
/// The referenced node is not resolved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    name: PathComponent,
    address: Cid,
}

impl DirectoryEntry {
    pub fn name(&self) -> &PathComponent {
        &self.name
    }

    pub fn address(&self) -> &Cid {
        &self.address
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// Multiple elements with the same name encountered
    #[error("{:?} is a duplicate name", .0.as_bstr())]
    DuplicateName(bytes::Bytes),
}

/// A Directory holds a list of [DirectoryEntry].
///
/// Entries keep the order they were added in, which is the order the backend
/// returns them in. Names are unique within a Directory, their validity is
/// already ensured by [PathComponent].
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    entries: Vec<DirectoryEntry>,
}

impl Directory {
    pub fn new() -> Self {
        Directory { entries: vec![] }
    }

    /// The number of entries in this directory.
    pub fn size(&self) -> u64 {
        self.entries.len() as u64
    }

    /// Allows iterating over all entries, in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &DirectoryEntry> + Send + Sync + '_ {
        self.entries.iter()
    }

    /// Looks up the entry with the given name. The comparison is byte-exact.
    pub fn get(&self, name: &[u8]) -> Option<&DirectoryEntry> {
        self.entries.iter().find(|e| e.name.as_ref() == name)
    }

    /// Appends an entry to the [Directory].
    ///
    /// Inserting an element that already exists with the same name in the
    /// directory will yield an error.
    pub fn add(&mut self, name: PathComponent, address: Cid) -> Result<(), DirectoryError> {
        if self.get(name.as_ref()).is_some() {
            return Err(DirectoryError::DuplicateName(name.into()));
        }

        self.entries.push(DirectoryEntry { name, address });
        Ok(())
    }

    /// Calculates the digest of a Directory, the blake3 hash over its
    /// entries in order. Names and addresses are length-prefixed, so no two
    /// different directories share an encoding.
    pub fn digest(&self) -> B3Digest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"directory\0");
        for entry in &self.entries {
            let name = entry.name.as_ref();
            let address = entry.address.as_str().as_bytes();
            hasher.update(&(name.len() as u64).to_le_bytes());
            hasher.update(name);
            hasher.update(&(address.len() as u64).to_le_bytes());
            hasher.update(address);
        }
        hasher.finalize().into()
    }
}
