use std::{cmp::Reverse, path::Path};

use log::{info, warn};
use maud::{html, PreEscaped};

use super::data::Post;

/// Earliest and latest publication year among listed posts.
pub(super) fn year_range(posts: &[Post]) -> Option<(u32, u32)> {
    let years = posts
        .iter()
        .filter(|p| !p.meta.is_index())
        .map(|p| p.meta.date.year);
    let min = years.clone().min()?;
    let max = years.max()?;
    Some((min, max))
}

/// Newest first. Posts of the same day keep their relative order in `posts`.
pub(super) fn chronological(posts: &[Post]) -> Vec<&Post> {
    let mut listed: Vec<&Post> = posts.iter().filter(|p| !p.meta.is_index()).collect();
    listed.sort_by_key(|p| Reverse(p.meta.date));
    listed
}

fn render_post_link(post: &Post, output_dir: &Path) -> String {
    let href = post.id.output(output_dir);
    html! {
        div.post-link {
            // titles may carry inline markup
            a href=(href.display()) { (PreEscaped(&post.meta.title)) }
            br;
            span.post-date { (post.meta.date) }
        }
    }
    .into_string()
}

pub(super) fn render_history(posts: &[Post], output_dir: &Path, year_headings: bool) -> String {
    match year_range(posts) {
        Some((min, max)) => info!("listing posts from {max} back to {min}"),
        None => warn!("there are no posts to list"),
    }

    let mut out = String::from("<div class=\"posts-history\">\n");
    let mut current_year = None;
    for post in chronological(posts) {
        let year = post.meta.date.year;
        if year_headings && current_year != Some(year) {
            out.push_str(&html! { h2.posts-year { (year) } }.into_string());
            out.push('\n');
            current_year = Some(year);
        }
        out.push_str(&render_post_link(post, output_dir));
        out.push('\n');
    }
    out.push_str("</div>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{date::PostDate, generator::data::PostId, metadata::PostMetadata};

    fn post(id: &str, title: &str, date: &str) -> Post {
        Post {
            id: PostId::new(id),
            meta: PostMetadata {
                title: title.to_string(),
                date: date.parse().unwrap(),
            },
        }
    }

    fn listed(posts: &[Post]) -> Vec<&str> {
        chronological(posts).iter().map(|p| p.id.as_str()).collect()
    }

    // year, month, day countdown over every post, the way the listing was first produced
    fn countdown_scan(posts: &[Post]) -> Vec<&str> {
        let Some((min, max)) = year_range(posts) else {
            return vec![];
        };
        let mut out = vec![];
        for year in (min..=max).rev() {
            for month in (1..=12).rev() {
                for day in (1..=31).rev() {
                    for p in posts.iter().filter(|p| !p.meta.is_index()) {
                        let d: PostDate = p.meta.date;
                        if d.year == year && d.month.number_from_month() == month && d.day == day {
                            out.push(p.id.as_str());
                        }
                    }
                }
            }
        }
        out
    }

    #[test]
    fn newest_first() {
        let posts = [post("a", "Alpha", "Jan 5, 2020"), post("b", "Beta", "Dec 1, 2021")];
        assert_eq!(listed(&posts), ["b", "a"]);
    }

    #[test]
    fn month_and_day_break_year_ties() {
        let posts = [
            post("mar", "", "Mar 2, 2021"),
            post("sept", "", "Sept 1, 2021"),
            post("mar10", "", "Mar 10, 2021"),
            post("old", "", "Dec 31, 2020"),
        ];
        assert_eq!(listed(&posts), ["sept", "mar10", "mar", "old"]);
    }

    #[test]
    fn same_day_posts_keep_input_order() {
        let posts = [
            post("z", "", "May 4, 2022"),
            post("newer", "", "May 5, 2022"),
            post("a", "", "May 4, 2022"),
            post("m", "", "May 4, 2022"),
        ];
        assert_eq!(listed(&posts), ["newer", "z", "a", "m"]);
    }

    #[test]
    fn boundaries() {
        let posts = [
            post("mid", "", "Jun 15, 2019"),
            post("first", "", "Jan 1, 2018"),
            post("last", "", "Dec 31, 2020"),
        ];
        let order = listed(&posts);
        assert_eq!(order.first(), Some(&"last"));
        assert_eq!(order.last(), Some(&"first"));
    }

    #[test]
    fn index_is_excluded_from_listing_and_range() {
        let posts = [
            post("index", "index", "Jan 1, 1990"),
            post("a", "Alpha", "Jan 5, 2020"),
            post("b", "Beta", "Dec 1, 2021"),
        ];
        assert_eq!(listed(&posts), ["b", "a"]);
        assert_eq!(year_range(&posts), Some((2020, 2021)));
        assert_eq!(year_range(&posts[..1]), None);
    }

    #[test]
    fn matches_countdown_scan() {
        let posts = [
            post("p1", "", "Feb 31, 2021"),
            post("p2", "", "Feb 28, 2021"),
            post("p3", "", "Oct 3, 2015"),
            post("index", "index", "Oct 3, 2030"),
            post("p4", "", "Feb 28, 2021"),
            post("p5", "", "Jan 1, 2015"),
            post("p6", "", "Nov 11, 2018"),
        ];
        assert_eq!(listed(&posts), countdown_scan(&posts));
    }

    #[test]
    fn renders_links() {
        let posts = [
            post("a", "Alpha", "Jan 5, 2020"),
            post("b", "<code>Beta</code>", "Dec 1, 2021"),
        ];
        assert_eq!(
            render_history(&posts, Path::new("posts"), false),
            concat!(
                "<div class=\"posts-history\">\n",
                "<div class=\"post-link\"><a href=\"posts/b.html\"><code>Beta</code></a><br><span class=\"post-date\">Dec 1, 2021</span></div>\n",
                "<div class=\"post-link\"><a href=\"posts/a.html\">Alpha</a><br><span class=\"post-date\">Jan 5, 2020</span></div>\n",
                "</div>\n",
            )
        );
    }

    #[test]
    fn renders_year_headings_once_per_year() {
        let posts = [
            post("a", "A", "Jan 5, 2020"),
            post("b", "B", "Dec 1, 2021"),
            post("c", "C", "Mar 1, 2021"),
        ];
        let html = render_history(&posts, Path::new("posts"), true);
        assert_eq!(html.matches("<h2 class=\"posts-year\">2021</h2>\n").count(), 1);
        assert_eq!(html.matches("<h2 class=\"posts-year\">2020</h2>\n").count(), 1);
        let h2021 = html.find(">2021</h2>").unwrap();
        let h2020 = html.find(">2020</h2>").unwrap();
        assert!(h2021 < html.find("posts/b.html").unwrap());
        assert!(html.find("posts/c.html").unwrap() < h2020);
        assert!(h2020 < html.find("posts/a.html").unwrap());
    }

    #[test]
    fn empty_listing() {
        assert_eq!(
            render_history(&[], Path::new("posts"), true),
            "<div class=\"posts-history\">\n</div>\n"
        );
    }
}
