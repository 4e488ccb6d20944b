//! Conversions from the site model into template [`Value`]s, and the three
//! template contexts: post pages, the comments partial, and index pages.
//! Field names are PascalCase (`.Site.Config.Title`, `.Post.Permalink`,
//! `.NextPage`, ...).

use crate::config::Config;
use crate::page::IndexPage;
use crate::post::Post;
use crate::site::Site;
use chrono::Datelike;
use gtmpl::Value;
use std::collections::HashMap;
use std::path::Path;

fn object(pairs: Vec<(&str, Value)>) -> Value {
    Value::Object(
        pairs
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect::<HashMap<String, Value>>(),
    )
}

fn path_value(path: &Path) -> Value {
    Value::String(path.display().to_string())
}

impl From<&Config> for Value {
    fn from(config: &Config) -> Value {
        object(vec![
            ("Title", (&config.title).into()),
            ("Description", (&config.description).into()),
            ("Keywords", (&config.keywords).into()),
            ("Posts", path_value(&config.posts_source_directory)),
            (
                "Images",
                match &config.images_source_directory {
                    Some(dir) => path_value(dir),
                    None => Value::String(String::new()),
                },
            ),
            ("Templates", path_value(&config.templates_directory)),
            ("Public", path_value(&config.public_output_directory)),
            ("PreviewLength", Value::from(config.preview_length as i64)),
            ("PostsPerPage", Value::from(config.posts_per_page as i64)),
            ("DisqusShortname", (&config.disqus_shortname).into()),
            ("GoogleAnalyticsID", (&config.google_analytics_id).into()),
        ])
    }
}

/// Converts a post with the given rendered comments HTML. `Date` is
/// human-readable (`January 2, 2006`); `Timestamp` is RFC 3339 for
/// `<time datetime=...>`.
pub fn post_value(post: &Post, comments: &str) -> Value {
    object(vec![
        ("Author", (&post.author).into()),
        ("Date", Value::String(post.date.format("%B %-d, %Y").to_string())),
        (
            "Timestamp",
            Value::String(post.date.format("%Y-%m-%dT%H:%M:%S").to_string()),
        ),
        ("Year", Value::from(post.date.year() as i64)),
        ("Month", Value::from(post.date.month() as i64)),
        ("Day", Value::from(post.date.day() as i64)),
        ("Title", (&post.title).into()),
        ("Content", (&post.content).into()),
        ("Preview", (&post.preview).into()),
        ("Page", Value::Bool(post.is_page)),
        ("Pinned", Value::Bool(post.is_pinned)),
        ("Template", (&post.template).into()),
        ("Permalink", (&post.permalink).into()),
        ("CommentsEnabled", Value::Bool(post.comments_enabled)),
        ("Comments", Value::String(comments.to_owned())),
    ])
}

impl From<&Post> for Value {
    /// Converts a [`Post`] whose comments haven't been rendered.
    fn from(post: &Post) -> Value {
        post_value(post, "")
    }
}

impl From<&Site> for Value {
    fn from(site: &Site) -> Value {
        object(vec![
            ("Config", (&site.config).into()),
            ("Posts", Value::Array(site.posts.iter().map(Value::from).collect())),
        ])
    }
}

/// The context for a post layout: `{Site, Post}`. `site` is the converted
/// [`Site`], which callers convert once and reuse.
pub fn post_context(site: &Value, post: &Post, comments: &str) -> Value {
    object(vec![
        ("Site", site.clone()),
        ("Post", post_value(post, comments)),
    ])
}

/// The context for the comments partial: `{DisqusShortname, Permalink}`.
pub fn comments_context(disqus_shortname: &str, permalink: &str) -> Value {
    object(vec![
        ("DisqusShortname", Value::String(disqus_shortname.to_owned())),
        ("Permalink", Value::String(permalink.to_owned())),
    ])
}

/// The context for the index layout: `{Site, Posts, CurrentPage,
/// PreviousPage, NextPage}`. Missing neighbours are empty strings.
pub fn index_context(site: &Value, page: &IndexPage) -> Value {
    let url = |opt: &Option<String>| Value::String(opt.clone().unwrap_or_default());
    object(vec![
        ("Site", site.clone()),
        (
            "Posts",
            Value::Array(page.posts.iter().map(|p| Value::from(*p)).collect()),
        ),
        ("CurrentPage", Value::String(page.url.clone())),
        ("PreviousPage", url(&page.prev)),
        ("NextPage", url(&page.next)),
    ])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::page::paginate;

    fn field<'a>(value: &'a Value, key: &str) -> &'a Value {
        match value {
            Value::Object(m) => &m[key],
            _ => panic!("not an object: {:?}", value),
        }
    }

    fn string(value: &Value) -> &str {
        match value {
            Value::String(s) => s,
            _ => panic!("not a string: {:?}", value),
        }
    }

    fn post() -> Post {
        Post::parse(
            "Author: A\nDate: 01-02-2020 10:05\nTitle: T\nTemplate: post\n\nHello",
            Path::new("posts/hello.md"),
            50,
        )
        .unwrap()
    }

    #[test]
    fn test_post_value() {
        let value = post_value(&post(), "<div>comments</div>");
        assert_eq!("A", string(field(&value, "Author")));
        assert_eq!("January 2, 2020", string(field(&value, "Date")));
        assert_eq!("2020-01-02T10:05:00", string(field(&value, "Timestamp")));
        assert_eq!("/2020/1/2/hello/", string(field(&value, "Permalink")));
        assert_eq!("<p>Hello</p>\n", string(field(&value, "Content")));
        assert_eq!("<div>comments</div>", string(field(&value, "Comments")));
        match field(&value, "Page") {
            Value::Bool(false) => {}
            other => panic!("wanted false; found {:?}", other),
        }
    }

    #[test]
    fn test_index_context_blank_neighbours() {
        let post = post();
        let refs = vec![&post];
        let pages = paginate(&refs, 10);
        let value = index_context(&Value::Nil, &pages[0]);
        assert_eq!("/", string(field(&value, "CurrentPage")));
        assert_eq!("", string(field(&value, "PreviousPage")));
        assert_eq!("", string(field(&value, "NextPage")));
        match field(&value, "Posts") {
            Value::Array(posts) => assert_eq!(1, posts.len()),
            other => panic!("wanted an array; found {:?}", other),
        }
    }

    #[test]
    fn test_comments_context() {
        let value = comments_context("blog", "/2020/1/2/hello/");
        assert_eq!("blog", string(field(&value, "DisqusShortname")));
        assert_eq!("/2020/1/2/hello/", string(field(&value, "Permalink")));
    }
}
