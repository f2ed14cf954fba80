use std::path::PathBuf;

use crate::generator::{discovery::DiscoveryOrder, makefile::PandocOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IndexFormat {
    /// A standalone `index.html` next to the Makefile.
    Html,
    /// `index.md` in the content directory, converted by the Makefile's `index` rule.
    Markdown,
}

#[derive(Debug)]
pub(crate) struct Context {
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
    pub makefile: PathBuf,
    pub index_html: PathBuf,

    pub header: PathBuf,
    pub badges: PathBuf,
    pub blog_name: String,

    pub index_format: IndexFormat,
    pub year_headings: bool,
    pub order: DiscoveryOrder,
    pub run_pandoc: bool,

    pub post_pandoc: PandocOptions,
    pub index_pandoc: PandocOptions,
}

impl Context {
    pub fn new(content_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            content_dir,
            output_dir,
            makefile: PathBuf::from("Makefile"),
            index_html: PathBuf::from("index.html"),
            header: PathBuf::from("header.html"),
            badges: PathBuf::from("badges.html"),
            blog_name: "hirrolot".to_string(),
            index_format: IndexFormat::Html,
            year_headings: false,
            order: DiscoveryOrder::Sorted,
            run_pandoc: false,
            post_pandoc: PandocOptions::post(),
            index_pandoc: PandocOptions::index(),
        }
    }

    pub fn index_path(&self) -> PathBuf {
        match self.index_format {
            IndexFormat::Html => self.index_html.clone(),
            IndexFormat::Markdown => self.content_dir.join("index.md"),
        }
    }
}
