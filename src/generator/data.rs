use std::{fmt, path::Path, path::PathBuf};

use crate::metadata::PostMetadata;

/// File name of a post up to its first `.`; names its source, its rule and its output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct PostId(String);

impl PostId {
    pub fn new(stem: impl Into<String>) -> Self {
        Self(stem.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn source(&self, content_dir: &Path) -> PathBuf {
        content_dir.join(format!("{}.md", self.0))
    }

    pub fn output(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.html", self.0))
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub(super) struct Post {
    pub id: PostId,
    pub meta: PostMetadata,
}
