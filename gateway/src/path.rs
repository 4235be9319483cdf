use bytes::Bytes;
use cidgate_castore::{Cid, PathComponent};
use percent_encoding::{percent_decode_str, percent_encode, AsciiSet, CONTROLS};
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::Error;

/// The prefix all content paths start with.
pub const IPFS_PREFIX: &str = "/ipfs/";

/// The path percent-encode set from the URL standard, plus `%` and `/`, as
/// those must not be taken literally inside a segment.
pub const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%')
    .add(b'/');

/// A parsed request path: a root [Cid], and the names to descend into from
/// there.
///
/// It renders back to `/ipfs/<root>[/<segment>]*` through [Display], and
/// [ContentPath::to_uri_path] for use in headers and links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPath {
    root: Cid,
    segments: Vec<PathComponent>,
}

impl ContentPath {
    pub fn new(root: Cid, segments: Vec<PathComponent>) -> Self {
        Self { root, segments }
    }

    pub fn root(&self) -> &Cid {
        &self.root
    }

    pub fn segments(&self) -> &[PathComponent] {
        &self.segments
    }

    /// The last segment, if any. This is the name file nodes are served
    /// under.
    pub fn file_name(&self) -> Option<&PathComponent> {
        self.segments.last()
    }

    /// Renders the path with the root and every segment percent-encoded
    /// using the given set.
    pub fn to_uri_path(&self, encode_set: &'static AsciiSet) -> String {
        let mut out = String::from(IPFS_PREFIX);
        out.extend(percent_encode(self.root.as_str().as_bytes(), encode_set));
        for segment in &self.segments {
            out.push('/');
            out.extend(percent_encode(segment.as_ref(), encode_set));
        }
        out
    }
}

impl Display for ContentPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", IPFS_PREFIX, self.root)?;
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// Parses a request path like `/ipfs/<cid>/some/file.txt`.
///
/// Empty segments are skipped, the others are percent-decoded and must be
/// valid [PathComponent]s afterwards.
impl FromStr for ContentPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| Error::InvalidPath {
            path: s.to_owned(),
            reason,
        };

        let rest = s
            .strip_prefix(IPFS_PREFIX)
            .ok_or_else(|| invalid("missing /ipfs/ prefix"))?;

        let mut parts = rest.split('/');

        let root: Cid = parts
            .next()
            .unwrap_or_default()
            .parse()
            .map_err(|_| invalid("missing or invalid root identifier"))?;

        let segments = parts
            .filter(|part| !part.is_empty())
            .map(|part| {
                // Entry names are arbitrary bytes, so are decoded segments.
                let decoded: Bytes = percent_decode_str(part).collect::<Vec<u8>>().into();
                PathComponent::try_from(decoded).map_err(|_| invalid("invalid segment"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { root, segments })
    }
}

/// Parses a request path. See [ContentPath::from_str].
pub fn parse(path: &str) -> Result<ContentPath, Error> {
    path.parse()
}
