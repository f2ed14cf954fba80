use anyhow::{bail, Context as _};
use log::{debug, error, info};
use maud::html;

use crate::{
    context::{Context, IndexFormat},
    metadata::PostMetadata,
};

use self::{
    data::{Post, PostId},
    history::render_history,
    makefile::Makefile,
    utils::{append_fragment, commit_outputs},
};

pub(crate) mod data;
pub(crate) mod discovery;
mod history;
pub(crate) mod makefile;
mod pandoc;
mod utils;

/// Reads the metadata of every post, reporting all broken posts before giving up.
fn collect_posts(ctx: &Context, ids: &[PostId]) -> anyhow::Result<Vec<Post>> {
    let mut posts = Vec::with_capacity(ids.len());
    let mut failures = 0;
    for id in ids {
        let path = id.source(&ctx.content_dir);
        match PostMetadata::read(&path) {
            Ok(meta) => {
                debug!("{id}: {:?} ({})", meta.title, meta.date);
                posts.push(Post {
                    id: id.clone(),
                    meta,
                });
            }
            Err(e) => {
                let e = anyhow::Error::new(e);
                error!("while reading metadata of {path:?}: {e:#}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} posts have invalid metadata", ids.len());
    }
    Ok(posts)
}

fn render_index(ctx: &Context, posts: &[Post]) -> anyhow::Result<String> {
    let mut out = String::new();
    match ctx.index_format {
        IndexFormat::Html => {
            out.push_str("<!DOCTYPE html><html><body>\n");
            append_fragment(&mut out, &ctx.header)?;
            out.push_str(concat!(
                "<link rel=\"stylesheet\" href=\"style.css\" />\n",
                "<link rel=\"shortcut icon\" href=\"myself.png\" type=\"image/x-icon\">\n",
                "<script src=\"script.js\"></script>\n\n",
            ));
            out.push_str(&html! { h1.blog-title { (ctx.blog_name) } }.into_string());
            out.push_str("\n\n");
            append_fragment(&mut out, &ctx.badges)?;
            out.push_str(&render_history(posts, &ctx.output_dir, ctx.year_headings));
            out.push_str("</body></html>\n");
        }
        IndexFormat::Markdown => {
            out.push_str(&format!("---\ntitle: {}\n---\n\n", ctx.blog_name));
            append_fragment(&mut out, &ctx.badges)?;
            out.push_str(&render_history(posts, &ctx.output_dir, ctx.year_headings));
        }
    }
    Ok(out)
}

fn run_pandoc(ctx: &Context, ids: &[PostId]) -> anyhow::Result<()> {
    std::fs::create_dir_all(&ctx.output_dir)
        .with_context(|| format!("while creating {:?}", ctx.output_dir))?;
    for id in ids {
        pandoc::convert(
            id.as_str(),
            &id.source(&ctx.content_dir),
            &id.output(&ctx.output_dir),
            &ctx.post_pandoc,
        )?;
    }
    if ctx.index_format == IndexFormat::Markdown {
        pandoc::convert("index", &ctx.index_path(), &ctx.index_html, &ctx.index_pandoc)?;
    }
    info!("converted {} documents", ids.len());
    Ok(())
}

pub(crate) fn generate(ctx: &Context) -> anyhow::Result<()> {
    let markdown_index = ctx.index_format == IndexFormat::Markdown;

    let ids = discovery::collect_post_ids(&ctx.content_dir, markdown_index, ctx.order)
        .with_context(|| format!("while discovering posts in {:?}", ctx.content_dir))?;
    info!("found {} posts in {:?}", ids.len(), ctx.content_dir);

    let posts = collect_posts(ctx, &ids)?;

    // nothing is written until both outputs are rendered
    let index_path = ctx.index_path();
    let index = render_index(ctx, &posts).context("while generating the index page")?;
    let makefile = Makefile {
        content_dir: &ctx.content_dir,
        output_dir: &ctx.output_dir,
        post_options: &ctx.post_pandoc,
        index: markdown_index.then_some((
            index_path.as_path(),
            ctx.index_html.as_path(),
            &ctx.index_pandoc,
        )),
    }
    .render(&ids);

    commit_outputs(&[(ctx.makefile.clone(), makefile), (index_path.clone(), index)])
        .context("while writing outputs")?;
    info!("wrote {:?} and {:?}", ctx.makefile, index_path);

    if ctx.run_pandoc {
        run_pandoc(ctx, &ids)?;
    }
    Ok(())
}
