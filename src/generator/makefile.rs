use std::{fmt::Write as _, path::Path};

use super::data::PostId;

/// The converter and the flags passed to it after the input and `--output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PandocOptions {
    pub program: String,
    pub header: Option<String>,
    pub table_of_contents: bool,
    pub citeproc: bool,
    pub css: Option<String>,
    pub after_body: Option<String>,
    pub in_header: Option<String>,
}

impl PandocOptions {
    pub fn post() -> Self {
        Self {
            program: "pandoc".to_string(),
            header: Some("header.html".to_string()),
            table_of_contents: true,
            citeproc: true,
            css: Some("../style.css".to_string()),
            after_body: Some("utterances.html".to_string()),
            in_header: Some("post_header_aux.html".to_string()),
        }
    }

    pub fn index() -> Self {
        Self {
            program: "pandoc".to_string(),
            header: Some("header.html".to_string()),
            table_of_contents: false,
            citeproc: false,
            css: Some("style.css".to_string()),
            after_body: None,
            in_header: None,
        }
    }

    pub fn args(&self) -> Vec<String> {
        fn flag(args: &mut Vec<String>, name: &str, value: &Option<String>) {
            if let Some(value) = value {
                args.push(name.to_string());
                args.push(value.clone());
            }
        }

        let mut args = vec!["--standalone".to_string()];
        flag(&mut args, "-H", &self.header);
        if self.table_of_contents {
            args.push("--table-of-contents".to_string());
        }
        if self.citeproc {
            args.push("--citeproc".to_string());
        }
        flag(&mut args, "--css", &self.css);
        flag(&mut args, "--include-after-body", &self.after_body);
        flag(&mut args, "--include-in-header", &self.in_header);
        args
    }
}

/// Arguments of a single conversion, shared by the Makefile recipe and `--run-pandoc`.
pub(super) fn pandoc_args(source: &Path, output: &Path, options: &PandocOptions) -> Vec<String> {
    let mut args = vec![
        source.display().to_string(),
        "--output".to_string(),
        output.display().to_string(),
    ];
    args.extend(options.args());
    args
}

pub(super) struct Makefile<'a> {
    pub content_dir: &'a Path,
    pub output_dir: &'a Path,
    pub post_options: &'a PandocOptions,
    /// Set when the index is a Markdown document that needs its own rule.
    pub index: Option<(&'a Path, &'a Path, &'a PandocOptions)>,
}

impl Makefile<'_> {
    fn rule(out: &mut String, target: &str, source: &Path, output: &Path, options: &PandocOptions) {
        let _ = write!(
            out,
            "{target}: {}\n\t{} {}\n\n",
            source.display(),
            options.program,
            pandoc_args(source, output, options).join(" ")
        );
    }

    pub fn render(&self, ids: &[PostId]) -> String {
        let mut out = String::from(".PHONY: all clean\n\n");

        for id in ids {
            Self::rule(
                &mut out,
                id.as_str(),
                &id.source(self.content_dir),
                &id.output(self.output_dir),
                self.post_options,
            );
        }
        if let Some((source, output, options)) = self.index {
            Self::rule(&mut out, "index", source, output, options);
        }

        out.push_str("all: ");
        for id in ids {
            let _ = write!(out, "{id} ");
        }
        if self.index.is_some() {
            out.push_str("index ");
        }
        out.push_str("\n\n");

        let _ = write!(
            out,
            "clean:\n\trm {}\n\n",
            self.output_dir.join("*.html").display()
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<PostId> {
        names.iter().map(|n| PostId::new(*n)).collect()
    }

    #[test]
    fn post_rules_all_and_clean() {
        let post_options = PandocOptions::post();
        let makefile = Makefile {
            content_dir: Path::new("content"),
            output_dir: Path::new("posts"),
            post_options: &post_options,
            index: None,
        };
        assert_eq!(
            makefile.render(&ids(&["a", "b"])),
            concat!(
                ".PHONY: all clean\n\n",
                "a: content/a.md\n\tpandoc content/a.md --output posts/a.html --standalone -H header.html --table-of-contents --citeproc --css ../style.css --include-after-body utterances.html --include-in-header post_header_aux.html\n\n",
                "b: content/b.md\n\tpandoc content/b.md --output posts/b.html --standalone -H header.html --table-of-contents --citeproc --css ../style.css --include-after-body utterances.html --include-in-header post_header_aux.html\n\n",
                "all: a b \n\n",
                "clean:\n\trm posts/*.html\n\n",
            )
        );
    }

    #[test]
    fn index_rule() {
        let post_options = PandocOptions::post();
        let index_options = PandocOptions::index();
        let makefile = Makefile {
            content_dir: Path::new("content"),
            output_dir: Path::new("posts"),
            post_options: &post_options,
            index: Some((
                Path::new("content/index.md"),
                Path::new("index.html"),
                &index_options,
            )),
        };
        let text = makefile.render(&ids(&["a"]));
        assert!(text.contains(
            "index: content/index.md\n\tpandoc content/index.md --output index.html --standalone -H header.html --css style.css\n\n"
        ));
        assert!(text.contains("all: a index \n\n"));
        assert!(text.find("a: content/a.md").unwrap() < text.find("index: content/index.md").unwrap());
    }

    #[test]
    fn empty_post_list() {
        let post_options = PandocOptions::post();
        let makefile = Makefile {
            content_dir: Path::new("content"),
            output_dir: Path::new("posts"),
            post_options: &post_options,
            index: None,
        };
        assert_eq!(
            makefile.render(&[]),
            ".PHONY: all clean\n\nall: \n\nclean:\n\trm posts/*.html\n\n"
        );
    }

    #[test]
    fn options_are_optional() {
        let options = PandocOptions {
            program: "pandoc".to_string(),
            header: None,
            table_of_contents: false,
            citeproc: true,
            css: None,
            after_body: None,
            in_header: None,
        };
        assert_eq!(options.args(), ["--standalone", "--citeproc"]);
    }

    #[test]
    fn recipe_uses_configured_program() {
        let post_options = PandocOptions {
            program: "/opt/pandoc/bin/pandoc".to_string(),
            ..PandocOptions::post()
        };
        let makefile = Makefile {
            content_dir: Path::new("content"),
            output_dir: Path::new("posts"),
            post_options: &post_options,
            index: None,
        };
        assert!(makefile
            .render(&ids(&["a"]))
            .contains("a: content/a.md\n\t/opt/pandoc/bin/pandoc content/a.md --output posts/a.html "));
    }
}
