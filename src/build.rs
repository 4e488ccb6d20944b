//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the output static site: cleaning the output directory,
//! parsing the posts ([`crate::parser`]), copying the theme's static assets,
//! paginating the index ([`crate::page`]), and rendering post and index pages
//! ([`crate::write`]). Every step is fatal on failure; nothing is rolled back
//! except that the output directory is always wiped first.

use crate::config::Config;
use crate::page::paginate;
use crate::parser::{Error as ParseError, Parser as PostParser};
use crate::site::Site;
use crate::write::{Error as WriteError, Writer};
use spdlog::{info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The theme's asset directories, relative to the templates directory. Each
/// is copied to the same name in the output directory.
const THEME_ASSET_DIRECTORIES: [&str; 4] = ["css", "js", "fonts", "images"];

/// Where the configured images directory lands in the output directory.
const IMAGES_OUTPUT_DIRECTORY: &str = "img";

/// Builds the site from a [`Config`] object. This calls into
/// [`PostParser::parse_posts`], [`Writer::write_posts`], and
/// [`Writer::write_index`] which do the heavy-lifting. This function also
/// copies the static assets into the output directory.
pub fn build_site(config: &Config) -> Result<()> {
    let output_directory = &config.public_output_directory;

    // The output directory is owned by the build; whatever is there goes.
    info!("cleaning `{}`", output_directory.display());
    rmdir(output_directory)?;
    std::fs::create_dir_all(output_directory).map_err(|err| Error::CreateDir {
        path: output_directory.to_owned(),
        err,
    })?;

    info!("reading posts from `{}`", config.posts_source_directory.display());
    let posts = PostParser::new(config.preview_length)
        .parse_posts(&config.posts_source_directory)?;
    info!("parsed {} posts", posts.len());
    let site = Site::new(config.clone(), posts);

    info!("copying static assets");
    copy_assets(config)?;

    let index_posts = site.index_posts();
    let index_pages = paginate(&index_posts, config.posts_per_page);
    if index_pages.is_empty() {
        warn!("no dated posts; the index will not be written");
    }

    let writer = Writer::new(&site);
    info!("writing {} post pages", site.posts.len());
    writer.write_posts()?;
    info!("writing {} index pages", index_pages.len());
    writer.write_index(&index_pages)?;

    Ok(())
}

/// Copies the theme's asset directories and the configured images directory
/// into the output directory. A theme may leave out any of its asset
/// directories; a configured images directory must exist.
fn copy_assets(config: &Config) -> Result<()> {
    let output_directory = &config.public_output_directory;
    for name in THEME_ASSET_DIRECTORIES.iter() {
        let src = config.templates_directory.join(name);
        if !src.is_dir() {
            warn!("theme has no `{}` directory; skipping", name);
            continue;
        }
        copy_dir(&src, &output_directory.join(name))?;
    }

    if let Some(images) = &config.images_source_directory {
        std::fs::metadata(images).map_err(|err| Error::Copy {
            src: images.clone(),
            err,
        })?;
        copy_dir(images, &output_directory.join(IMAGES_OUTPUT_DIRECTORY))?;
    }
    Ok(())
}

/// Recursively copies `src` to `dst`. File permissions are preserved.
fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    for result in WalkDir::new(src) {
        let entry = result?;
        // strip_prefix() can't fail; every entry is beneath `src`
        let target = match entry.path().strip_prefix(src) {
            Ok(relative) => dst.join(relative),
            Err(_) => continue,
        };
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).map_err(|err| Error::CreateDir {
                path: target.clone(),
                err,
            })?;
        } else {
            std::fs::copy(entry.path(), &target).map_err(|err| Error::Copy {
                src: entry.path().to_owned(),
                err,
            })?;
        }
    }
    Ok(())
}

fn rmdir(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(x) => Ok(x),
        Err(e) => match e.kind() {
            std::io::ErrorKind::NotFound => Ok(()),
            _ => Err(Error::Clean {
                path: dir.to_owned(),
                err: e,
            }),
        },
    }
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during parsing, writing,
/// cleaning the output directory, and copying assets.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors during parsing.
    Parse(ParseError),

    /// Returned for errors rendering [`crate::post::Post`]s or index pages to
    /// disk as HTML files.
    Write(WriteError),

    /// Returned for I/O problems while cleaning the output directory.
    Clean { path: PathBuf, err: std::io::Error },

    /// Returned for I/O problems while creating output directories.
    CreateDir { path: PathBuf, err: std::io::Error },

    /// Returned for I/O problems while copying an asset file.
    Copy { src: PathBuf, err: std::io::Error },

    /// Returned when an asset directory can't be walked.
    WalkDir(walkdir::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(err) => fmt::Display::fmt(err, f),
            Error::Write(err) => fmt::Display::fmt(err, f),
            Error::Clean { path, err } => {
                write!(f, "Cleaning directory '{}': {}", path.display(), err)
            }
            Error::CreateDir { path, err } => {
                write!(f, "Creating directory '{}': {}", path.display(), err)
            }
            Error::Copy { src, err } => {
                write!(f, "Copying '{}': {}", src.display(), err)
            }
            Error::WalkDir(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Write(err) => Some(err),
            Error::Clean { path: _, err } => Some(err),
            Error::CreateDir { path: _, err } => Some(err),
            Error::Copy { src: _, err } => Some(err),
            Error::WalkDir(err) => Some(err),
        }
    }
}

impl From<ParseError> for Error {
    /// Converts [`ParseError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: ParseError) -> Error {
        Error::Parse(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}
