//! Defines the [`Parser`] which ingests every post file in a directory. See
//! [`crate::post`] for the format of an individual post.

use crate::post::{self, Post};
use spdlog::debug;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Parses [`Post`] objects from source files.
pub struct Parser {
    /// The number of words kept in each post's preview.
    preview_length: usize,
}

impl Parser {
    /// Constructs a new parser. See fields on [`Parser`] for argument
    /// descriptions.
    pub fn new(preview_length: usize) -> Parser {
        Parser { preview_length }
    }

    /// Parses the single post file at `path`.
    pub fn parse_post(&self, path: &Path) -> Result<Post> {
        let contents = std::fs::read_to_string(path).map_err(|err| Error::Io {
            path: path.to_owned(),
            err,
        })?;
        Ok(Post::parse(&contents, path, self.preview_length)?)
    }

    /// Parses every file directly inside `source_directory`, in file name
    /// order. Symlinks are followed; subdirectories and hidden files are
    /// skipped. The first file that fails to parse aborts the whole
    /// operation.
    ///
    /// The returned posts are in encounter order; sorting by date is left to
    /// [`crate::site::Site::index_posts`].
    pub fn parse_posts(&self, source_directory: &Path) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        for result in WalkDir::new(source_directory)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = result?;
            if entry.file_type().is_dir() || is_hidden(entry.file_name()) {
                continue;
            }
            debug!("parsing post `{}`", entry.path().display());
            posts.push(self.parse_post(entry.path())?);
        }
        Ok(posts)
    }
}

fn is_hidden(file_name: &std::ffi::OsStr) -> bool {
    file_name.to_str().map_or(false, |name| name.starts_with('.'))
}

/// Represents the result of ingesting posts.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error ingesting posts from disk.
#[derive(Debug)]
pub enum Error {
    /// Returned when a post file is read but fails to parse.
    Post(post::Error),

    /// Returned when a post file can't be read.
    Io { path: PathBuf, err: std::io::Error },

    /// Returned when the posts directory can't be listed.
    WalkDir(walkdir::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Post(err) => fmt::Display::fmt(err, f),
            Error::Io { path, err } => {
                write!(f, "reading post `{}`: {}", path.display(), err)
            }
            Error::WalkDir(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Post(err) => Some(err),
            Error::Io { path: _, err } => Some(err),
            Error::WalkDir(err) => Some(err),
        }
    }
}

impl From<post::Error> for Error {
    fn from(err: post::Error) -> Error {
        Error::Post(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator while listing directories.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    fn write_post(dir: &Path, name: &str, title: &str) {
        fs::write(
            dir.join(name),
            format!(
                "Author: A\nDate: 01-02-2020 10:00\nTitle: {}\nTemplate: post\n\nbody",
                title
            ),
        )
        .unwrap();
    }

    #[test]
    fn test_parse_posts() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "b.md", "B");
        write_post(dir.path(), "a.md", "A");
        write_post(dir.path(), ".draft.md", "Hidden");
        fs::create_dir(dir.path().join("nested")).unwrap();
        write_post(&dir.path().join("nested"), "c.md", "C");

        let posts = Parser::new(50).parse_posts(dir.path())?;
        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(vec!["A", "B"], titles);
        assert_eq!("/2020/1/2/a/", posts[0].permalink);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_symlinked_posts() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir(&posts).unwrap();
        write_post(dir.path(), "real.md", "Linked");
        std::os::unix::fs::symlink(dir.path().join("real.md"), posts.join("linked.md"))
            .unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        write_post(&dir.path().join("drafts"), "d.md", "Draft");
        std::os::unix::fs::symlink(dir.path().join("drafts"), posts.join("drafts"))
            .unwrap();

        let posts = Parser::new(50).parse_posts(&posts)?;
        assert_eq!(1, posts.len());
        assert_eq!("Linked", posts[0].title);
        assert_eq!("/2020/1/2/linked/", posts[0].permalink);
        Ok(())
    }

    #[test]
    fn test_first_failure_aborts() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "a.md", "A");
        fs::write(dir.path().join("b.md"), "Author: A\n").unwrap();

        match Parser::new(50).parse_posts(dir.path()) {
            Err(Error::Post(post::Error::MalformedPost(path))) => {
                assert_eq!(dir.path().join("b.md"), path)
            }
            other => panic!("wanted MalformedPost; found {:?}", other),
        }
    }

    #[test]
    fn test_missing_directory() {
        match Parser::new(50).parse_posts(Path::new("/no/such/posts")) {
            Err(Error::WalkDir(_)) => {}
            other => panic!("wanted Error::WalkDir; found {:?}", other),
        }
    }
}
