use bstr::ByteSlice;
use std::fmt::{self, Debug, Display};

/// A wrapper type for validated path components, used both as directory
/// entry names and as the segments of a requested path.
/// Internally uses a [bytes::Bytes], but disallows
/// slashes, and null bytes to be present, as well as
/// '.', '..' and the empty string.
#[repr(transparent)]
#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct PathComponent {
    inner: bytes::Bytes,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ComponentError {
    #[error("{:?} is not a valid name", .0.as_bstr())]
    InvalidName(bytes::Bytes),
}

impl PathComponent {
    /// Returns the component as a string slice, if it is valid UTF-8.
    pub fn to_str(&self) -> Option<&str> {
        self.inner.to_str().ok()
    }
}

impl AsRef<[u8]> for PathComponent {
    fn as_ref(&self) -> &[u8] {
        self.inner.as_ref()
    }
}

impl From<PathComponent> for bytes::Bytes {
    fn from(value: PathComponent) -> Self {
        value.inner
    }
}

pub(crate) fn is_valid_name<B: AsRef<[u8]>>(name: B) -> bool {
    let v = name.as_ref();

    !v.is_empty() && v != *b".." && v != *b"." && !v.contains(&0x00) && !v.contains(&b'/')
}

impl TryFrom<bytes::Bytes> for PathComponent {
    type Error = ComponentError;

    fn try_from(value: bytes::Bytes) -> Result<Self, Self::Error> {
        if !is_valid_name(&value) {
            return Err(ComponentError::InvalidName(value));
        }

        Ok(Self { inner: value })
    }
}

impl TryFrom<&'static [u8]> for PathComponent {
    type Error = ComponentError;

    fn try_from(value: &'static [u8]) -> Result<Self, Self::Error> {
        bytes::Bytes::from_static(value).try_into()
    }
}

impl TryFrom<&str> for PathComponent {
    type Error = ComponentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        bytes::Bytes::copy_from_slice(value.as_bytes()).try_into()
    }
}

impl TryFrom<String> for PathComponent {
    type Error = ComponentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        bytes::Bytes::from(value).try_into()
    }
}

impl TryFrom<&std::ffi::OsStr> for PathComponent {
    type Error = ComponentError;

    #[cfg(target_family = "unix")]
    fn try_from(value: &std::ffi::OsStr) -> Result<Self, Self::Error> {
        use std::os::unix::ffi::OsStrExt;
        bytes::Bytes::copy_from_slice(value.as_bytes()).try_into()
    }

    #[cfg(not(target_family = "unix"))]
    fn try_from(value: &std::ffi::OsStr) -> Result<Self, Self::Error> {
        bytes::Bytes::copy_from_slice(value.as_encoded_bytes()).try_into()
    }
}

impl PartialEq<str> for PathComponent {
    fn eq(&self, other: &str) -> bool {
        self.inner.as_ref() == other.as_bytes()
    }
}

impl Debug for PathComponent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Debug::fmt(self.inner.as_bstr(), f)
    }
}

impl Display for PathComponent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(self.inner.as_bstr(), f)
    }
}
