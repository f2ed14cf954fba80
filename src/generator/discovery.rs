use std::path::Path;

use log::debug;

use super::data::PostId;
use crate::error::{Error, Result};

pub(crate) const MAX_POSTS: usize = 512;

const INDEX_DOCUMENT: &str = "index.md";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DiscoveryOrder {
    /// Lexicographic by post id, the same on every filesystem.
    Sorted,
    /// Whatever `read_dir` yields.
    Filesystem,
}

/// Lists the posts of `content_dir`. The returned order breaks ties between
/// posts published on the same day.
pub(super) fn collect_post_ids(
    content_dir: &Path,
    skip_index_document: bool,
    order: DiscoveryOrder,
) -> Result<Vec<PostId>> {
    let read_dir_err = |source: std::io::Error| Error::ReadDir {
        path: content_dir.to_owned(),
        source,
    };

    let mut ids = vec![];
    for entry in std::fs::read_dir(content_dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let name = entry.file_name().to_string_lossy().to_string();

        if entry.file_type().map_err(read_dir_err)?.is_dir() {
            debug!("skipping directory {name:?}");
            continue;
        }
        if skip_index_document && name == INDEX_DOCUMENT {
            debug!("skipping index document {name:?}");
            continue;
        }

        let stem = match name.split_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => return Err(Error::InvalidPostName { name: name.clone() }),
        };
        if ids.len() == MAX_POSTS {
            return Err(Error::TooManyPosts { limit: MAX_POSTS });
        }
        debug!("found post {stem:?}");
        ids.push(PostId::new(stem));
    }

    if order == DiscoveryOrder::Sorted {
        ids.sort();
    }
    Ok(ids)
}
