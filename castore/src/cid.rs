use data_encoding::HEXLOWER;
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::B3Digest;

/// A content identifier, the key nodes are looked up by.
///
/// Its internal structure is not interpreted: anything non-empty without
/// slashes and null bytes is accepted, so `Qm…` style identifiers work just as
/// well as the ones [Cid::from_digest] produces.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cid(String);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CidError {
    #[error("content identifier is empty")]
    Empty,
    #[error("content identifier {0:?} contains invalid characters")]
    InvalidCharacters(String),
}

impl Cid {
    /// Derives the identifier the memory backend uses for a [B3Digest]:
    /// `b3` followed by the lowercase hex digest.
    pub fn from_digest(digest: &B3Digest) -> Self {
        Self(format!("b3{}", HEXLOWER.encode(digest.as_slice())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Cid {
    type Error = CidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(CidError::Empty);
        }
        if value.contains(['/', '\0']) {
            return Err(CidError::InvalidCharacters(value));
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for Cid {
    type Error = CidError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_owned().try_into()
    }
}

impl FromStr for Cid {
    type Err = CidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.try_into()
    }
}

impl AsRef<str> for Cid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
