use std::path::PathBuf;

use anyhow::{bail, Context as _};
use clap::{command, Arg, ArgAction, ArgMatches};
use context::{Context, IndexFormat};
use generator::{discovery::DiscoveryOrder, generate};

mod context;
mod date;
mod error;
mod generator;
mod metadata;

fn path_arg(matches: &ArgMatches, id: &str) -> anyhow::Result<PathBuf> {
    matches
        .get_one::<PathBuf>(id)
        .cloned()
        .with_context(|| format!("{id} is required"))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = command!()
        .args(&[
            Arg::new("content_dir")
                .long("content-dir")
                .help("Directory of posts, one Markdown file per post")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("content"),
            Arg::new("output_dir")
                .long("output-dir")
                .help("Directory the Makefile renders posts into")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("posts"),
            Arg::new("makefile")
                .long("makefile")
                .help("Path of the generated Makefile. Existing file will be replaced.")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("Makefile"),
            Arg::new("index_html")
                .long("index-html")
                .help("Path of the rendered index page")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("index.html"),
            Arg::new("header")
                .long("header")
                .help("HTML fragment included at the top of the index page")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("header.html"),
            Arg::new("badges")
                .long("badges")
                .help("HTML fragment included above the list of posts")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("badges.html"),
            Arg::new("blog_name")
                .long("blog-name")
                .help("Title of the index page")
                .default_value("hirrolot"),
            Arg::new("index_format")
                .long("index-format")
                .help("Write index.html directly, or index.md into the content directory for pandoc")
                .value_parser(["html", "markdown"])
                .default_value("html"),
            Arg::new("year_headings")
                .long("year-headings")
                .help("Group the list of posts under a heading per year")
                .action(ArgAction::SetTrue),
            Arg::new("filesystem_order")
                .long("filesystem-order")
                .help("Keep directory order instead of sorting posts by name (affects posts of the same day)")
                .action(ArgAction::SetTrue),
            Arg::new("pandoc")
                .long("pandoc")
                .help("Converter invoked by the Makefile and by --run-pandoc")
                .default_value("pandoc"),
            Arg::new("run_pandoc")
                .long("run-pandoc")
                .help("Also convert every post with pandoc right away")
                .action(ArgAction::SetTrue),
        ])
        .get_matches();

    let content_dir = path_arg(&matches, "content_dir")?;
    if !content_dir.is_dir() {
        bail!("content_dir must be a directory.");
    }
    let output_dir = path_arg(&matches, "output_dir")?;
    if output_dir.exists() && !output_dir.is_dir() {
        bail!("if output_dir exists, it must be directory.");
    }

    let mut ctx = Context::new(content_dir, output_dir);
    ctx.makefile = path_arg(&matches, "makefile")?;
    ctx.index_html = path_arg(&matches, "index_html")?;
    ctx.header = path_arg(&matches, "header")?;
    ctx.badges = path_arg(&matches, "badges")?;
    if let Some(blog_name) = matches.get_one::<String>("blog_name") {
        ctx.blog_name = blog_name.clone();
    }
    if matches.get_one::<String>("index_format").map(String::as_str) == Some("markdown") {
        ctx.index_format = IndexFormat::Markdown;
    }
    ctx.year_headings = matches.get_flag("year_headings");
    if matches.get_flag("filesystem_order") {
        ctx.order = DiscoveryOrder::Filesystem;
    }
    if let Some(program) = matches.get_one::<String>("pandoc") {
        ctx.post_pandoc.program = program.clone();
        ctx.index_pandoc.program = program.clone();
    }
    ctx.run_pandoc = matches.get_flag("run_pandoc");

    generate(&ctx)
}
