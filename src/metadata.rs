use std::{fs::File, io::Read, path::Path};

use crate::{
    date::PostDate,
    error::{Error, Result},
};

/// Front matter has to fit in this many leading bytes of every post.
pub(crate) const METADATA_PREFIX_LEN: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostMetadata {
    pub title: String,
    pub date: PostDate,
}

impl PostMetadata {
    pub fn read(path: &Path) -> Result<Self> {
        Self::parse(&read_prefix(path)?)
    }

    pub fn parse(prefix: &str) -> Result<Self> {
        Ok(PostMetadata {
            title: find_quoted_field(prefix, "title")?.to_string(),
            date: find_field(prefix, "date")?.parse()?,
        })
    }

    /// The index document lists posts, it is never listed itself.
    pub fn is_index(&self) -> bool {
        self.title == "index"
    }
}

pub(crate) fn read_prefix(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(Error::io(path))?;
    let mut buf = Vec::with_capacity(METADATA_PREFIX_LEN);
    file.take(METADATA_PREFIX_LEN as u64)
        .read_to_end(&mut buf)
        .map_err(Error::io(path))?;
    if buf.len() < METADATA_PREFIX_LEN {
        return Err(Error::ShortRead {
            path: path.to_owned(),
            expected: METADATA_PREFIX_LEN,
            found: buf.len(),
        });
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Returns the rest of the line after the first `{name}: ` in `text`.
pub(crate) fn find_field<'a>(text: &'a str, name: &'static str) -> Result<&'a str> {
    let start = text
        .find(name)
        .ok_or(Error::FieldNotFound { field: name })?;
    let value = text[start + name.len()..]
        .strip_prefix(": ")
        .ok_or(Error::MissingSeparator { field: name })?;
    let end = value
        .find('\n')
        .ok_or(Error::UnterminatedField { field: name })?;

    Ok(&value[..end])
}

/// Like [`find_field`], returning what lies between the opening quote and the next quote.
pub(crate) fn find_quoted_field<'a>(text: &'a str, name: &'static str) -> Result<&'a str> {
    let value = find_field(text, name)?
        .strip_prefix('"')
        .ok_or(Error::MissingOpeningQuote { field: name })?;
    let end = value
        .find('"')
        .ok_or(Error::MissingClosingQuote { field: name })?;

    Ok(&value[..end])
}
