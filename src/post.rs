//! Defines the [`Post`] type and the logic for parsing a single post from the
//! contents of its source file. A post source file is a metadata block, a
//! blank line, and a markdown body:
//!
//! ```md
//! Author: Jane
//! Date: 04-16-2021 09:30
//! Title: Hello, world!
//! Template: post
//! Comments: enabled
//!
//! # Hello
//!
//! World
//! ```
//!
//! Recognized metadata keys are `Author`, `Date`, `Title`, `Template`
//! (required) and `Page`, `Pinned`, `Comments` (optional).

use crate::markdown;
use chrono::{Datelike, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};

/// The format of the `Date` metadata field, e.g. `04-16-2021 09:30`.
pub const DATE_FORMAT: &str = "%m-%d-%Y %H:%M";

/// The text that replaces code blocks and images in previews.
const ELIDED: &str = "[...]";

/// A single rendered unit of the site: either a dated post, which is listed
/// on the index pages, or a standalone page (`Page: true`), which isn't.
#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    pub author: String,
    pub date: NaiveDateTime,
    pub title: String,

    /// The name of the layout, i.e. the file `{templates}/{template}.html`.
    pub template: String,

    /// Pages are excluded from the index and live under `/etc/`.
    pub is_page: bool,

    /// Only meaningful to templates.
    pub is_pinned: bool,

    /// Whether the comments partial is rendered for this post.
    pub comments_enabled: bool,

    /// The body converted to HTML.
    pub content: String,

    /// A shortened, code-free derivative of `content` for index pages. See
    /// [`preview`].
    pub preview: String,

    /// The site-relative location of the post. See [`permalink`].
    pub permalink: String,

    /// The file the post was parsed from.
    pub source_path: PathBuf,
}

impl Post {
    /// Parses a [`Post`] from the `contents` of the file at `source_path`.
    /// `preview_length` is the number of words kept in [`Post::preview`].
    pub fn parse(
        contents: &str,
        source_path: &Path,
        preview_length: usize,
    ) -> Result<Post> {
        let contents = contents.replace("\r\n", "\n");
        let (metadata, body) = contents
            .split_once("\n\n")
            .ok_or_else(|| Error::MalformedPost(source_path.to_owned()))?;

        let content = markdown::to_html(body.trim_matches('\n'));
        let preview = preview(&content, preview_length);

        let metadata = Metadata(metadata);
        let author = metadata.require("Author", source_path)?;
        let date = metadata.require("Date", source_path)?;
        let title = metadata.require("Title", source_path)?;
        let template = metadata.require("Template", source_path)?;
        let date = NaiveDateTime::parse_from_str(date, DATE_FORMAT).map_err(
            |_| Error::InvalidDate {
                value: date.to_owned(),
                path: source_path.to_owned(),
            },
        )?;
        let is_page = metadata.flag("Page", "true");

        let basename = source_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| Error::InvalidFileName(source_path.to_owned()))?;

        Ok(Post {
            author: author.to_owned(),
            permalink: permalink(&date, is_page, basename),
            date,
            title: title.to_owned(),
            template: template.to_owned(),
            is_page,
            is_pinned: metadata.flag("Pinned", "true"),
            comments_enabled: metadata.flag("Comments", "enabled"),
            content,
            preview,
            source_path: source_path.to_owned(),
        })
    }
}

/// The metadata block of a post, one `Key: value` per line.
struct Metadata<'a>(&'a str);

impl<'a> Metadata<'a> {
    /// Returns the trimmed value of the first line starting with `key:`.
    fn get(&self, key: &str) -> Option<&'a str> {
        self.0.lines().find_map(|line| {
            line.trim_start()
                .strip_prefix(key)?
                .strip_prefix(':')
                .map(str::trim)
        })
    }

    /// Like [`Metadata::get`], but a missing or empty value is an error.
    fn require(&self, key: &'static str, path: &Path) -> Result<&'a str> {
        match self.get(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(Error::MissingField {
                field: key,
                path: path.to_owned(),
            }),
        }
    }

    /// True when `key` is present and its value equals `token`, ignoring
    /// case.
    fn flag(&self, key: &str, token: &str) -> bool {
        self.get(key)
            .map_or(false, |value| value.eq_ignore_ascii_case(token))
    }
}

/// Derives a post's permalink: `/etc/{basename}/` for pages and
/// `/{year}/{month}/{day}/{basename}/` for everything else. Month and day are
/// not zero-padded.
pub fn permalink(date: &NaiveDateTime, is_page: bool, basename: &str) -> String {
    if is_page {
        format!("/etc/{}/", basename)
    } else {
        format!(
            "/{}/{}/{}/{}/",
            date.year(),
            date.month(),
            date.day(),
            basename
        )
    }
}

/// Builds a preview from rendered post HTML. Every `<pre>` or `<code>` block
/// (from its opening tag through the nearest closing tag) and every `<img>`
/// tag is replaced with `[...]`; then, if the text has more than `length`
/// space-separated words, it is cut to the first `length` words followed by
/// `...`.
pub fn preview(html: &str, length: usize) -> String {
    lazy_static! {
        static ref BLOCK_REGEX: Regex = Regex::new(
            r"(?i)<img[^>]*>(?:</img>)?|<(?:pre|code)[^>]*>[\s\S]*?(?:</(?:pre|code|img)>)+"
        )
        .unwrap();
    }

    let stripped = BLOCK_REGEX.replace_all(html, ELIDED);
    let words: Vec<&str> = stripped.split(' ').collect();
    if words.len() <= length {
        stripped.into_owned()
    } else {
        format!("{}...", words[..length].join(" "))
    }
}

/// Represents the result of a [`Post`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a [`Post`]. Every variant carries the path of
/// the offending source file.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Returned when there's no blank line separating metadata from content.
    MalformedPost(PathBuf),

    /// Returned when a required metadata field is absent or empty.
    MissingField { field: &'static str, path: PathBuf },

    /// Returned when the `Date` field doesn't match [`DATE_FORMAT`].
    InvalidDate { value: String, path: PathBuf },

    /// Returned when the source file name isn't valid UTF-8.
    InvalidFileName(PathBuf),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedPost(path) => write!(
                f,
                "parsing post `{}`: either metadata or post content is missing",
                path.display()
            ),
            Error::MissingField { field, path } => write!(
                f,
                "parsing post `{}`: {} not defined",
                path.display(),
                field
            ),
            Error::InvalidDate { value, path } => write!(
                f,
                "parsing post `{}`: date `{}` does not match `MM-DD-YYYY HH:MM`",
                path.display(),
                value
            ),
            Error::InvalidFileName(path) => {
                write!(f, "invalid file name: {:?}", path)
            }
        }
    }
}

impl std::error::Error for Error {}
