use crate::page::IndexPage;
use crate::post::Post;
use crate::site::Site;
use crate::template;
use crate::value::{comments_context, index_context, post_context};
use gtmpl::Value;
use spdlog::debug;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// The name of the comments partial, relative to the templates directory.
const COMMENTS_TEMPLATE: &str = "comments.html";

/// The name of the index layout, relative to the templates directory.
const INDEX_TEMPLATE: &str = "index.html";

/// Responsible for templating and writing HTML pages to disk from a [`Site`].
pub struct Writer<'a> {
    /// The site being written. Every template sees it as `.Site`.
    site: &'a Site,

    /// `site` converted for templating once, up front.
    site_value: Value,
}

impl<'a> Writer<'a> {
    pub fn new(site: &'a Site) -> Writer<'a> {
        Writer {
            site,
            site_value: Value::from(site),
        }
    }

    fn templates_directory(&self) -> &Path {
        &self.site.config.templates_directory
    }

    fn output_directory(&self) -> &Path {
        &self.site.config.public_output_directory
    }

    /// Renders the comments partial for `post`, or nothing if comments are
    /// disabled for it.
    fn render_comments(&self, post: &Post) -> Result<String> {
        if !post.comments_enabled {
            return Ok(String::new());
        }
        Ok(template::render(
            &self.templates_directory().join(COMMENTS_TEMPLATE),
            comments_context(&self.site.config.disqus_shortname, &post.permalink),
        )?)
    }

    /// Renders a single post page with its layout.
    pub fn render_post(&self, post: &Post) -> Result<String> {
        let comments = self.render_comments(post)?;
        Ok(template::render(
            &self
                .templates_directory()
                .join(format!("{}.html", post.template)),
            post_context(&self.site_value, post, &comments),
        )?)
    }

    /// Renders a single index page with the index layout.
    pub fn render_index_page(&self, page: &IndexPage) -> Result<String> {
        Ok(template::render(
            &self.templates_directory().join(INDEX_TEMPLATE),
            index_context(&self.site_value, page),
        )?)
    }

    /// Renders every post (pages included) and writes each to
    /// `{public}/{permalink}/index.html`.
    pub fn write_posts(&self) -> Result<()> {
        for post in &self.site.posts {
            let html = self.render_post(post)?;
            let file_path = self
                .output_directory()
                .join(post.permalink.trim_start_matches('/'))
                .join("index.html");
            debug!("writing post `{}`", file_path.display());
            write_file(&file_path, &html)?;
        }
        Ok(())
    }

    /// Renders every index page and writes it to its
    /// [`IndexPage::output_path`].
    pub fn write_index(&self, pages: &[IndexPage]) -> Result<()> {
        for page in pages {
            let html = self.render_index_page(page)?;
            let file_path = page.output_path(self.output_directory());
            debug!("writing index page `{}`", file_path.display());
            write_file(&file_path, &html)?;
        }
        Ok(())
    }
}

/// Writes `contents` to `path`, creating missing parent directories.
fn write_file(path: &Path, contents: &str) -> Result<()> {
    let annotate = |err| Error::Io {
        path: path.to_owned(),
        err,
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(annotate)?;
    }
    std::fs::write(path, contents).map_err(annotate)
}

/// The result of a fallible page-writing operation.
type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// An error during templating.
    Template(template::Error),

    /// An error writing the output files.
    Io { path: PathBuf, err: io::Error },
}

impl From<template::Error> for Error {
    /// Converts a [`template::Error`] into an [`Error`]. This allows us to
    /// use the `?` operator for fallible template operations.
    fn from(err: template::Error) -> Error {
        Error::Template(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => fmt::Display::fmt(err, f),
            Error::Io { path, err } => {
                write!(f, "Writing '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(err) => Some(err),
            Error::Io { path: _, err } => Some(err),
        }
    }
}
