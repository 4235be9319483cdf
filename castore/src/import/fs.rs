//! Imports that deal with a real filesystem.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use super::IngestionError;
use crate::nodeservice::NodeWriter;
use crate::{Cid, Directory, PathComponent};

/// Ingests the contents at a given path through the [NodeWriter], and
/// returns the [Cid] of the root.
///
/// Symlinks are followed. Entries of each directory are inserted sorted by
/// their file name, so ingesting the same tree twice yields the same [Cid].
///
/// This function will walk the filesystem using `walkdir` and will consume
/// `O(#number of entries)` space.
#[instrument(skip(node_writer, path), fields(path = %path.as_ref().display()), err)]
pub async fn ingest_path<P>(node_writer: &dyn NodeWriter, path: P) -> Result<Cid, IngestionError>
where
    P: AsRef<Path>,
{
    let root = path.as_ref();

    // Children are visited before their parents, so when we encounter a
    // directory, all of its entries have already been collected in here.
    let mut directories: HashMap<PathBuf, Directory> = HashMap::default();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .contents_first(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| IngestionError::Walk(root.to_path_buf(), e))?;
        let file_type = entry.file_type();

        let cid = if file_type.is_dir() {
            // If we don't have it in there, it's an empty directory.
            let directory = directories.remove(entry.path()).unwrap_or_default();
            node_writer
                .put_directory(directory)
                .await
                .map_err(|e| IngestionError::Write(entry.path().to_path_buf(), e))?
        } else if file_type.is_file() {
            let contents = tokio::fs::read(entry.path())
                .await
                .map_err(|e| IngestionError::UnableToRead(entry.path().to_path_buf(), e))?;
            node_writer
                .put_blob(contents.into())
                .await
                .map_err(|e| IngestionError::Write(entry.path().to_path_buf(), e))?
        } else {
            return Err(IngestionError::UnsupportedFileType(
                entry.path().to_path_buf(),
            ));
        };

        debug!(path = %entry.path().display(), %cid, "ingested");

        // The root comes last.
        if entry.depth() == 0 {
            return Ok(cid);
        }

        let name = PathComponent::try_from(entry.file_name())
            .map_err(|e| IngestionError::InvalidName(entry.path().to_path_buf(), e))?;

        let parent = entry
            .path()
            .parent()
            .ok_or_else(|| IngestionError::MissingRoot(entry.path().to_path_buf()))?;

        directories
            .entry(parent.to_path_buf())
            .or_default()
            .add(name, cid)
            .map_err(|e| IngestionError::Directory(parent.to_path_buf(), e))?;
    }

    Err(IngestionError::MissingRoot(root.to_path_buf()))
}
