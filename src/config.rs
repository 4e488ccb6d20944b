//! Defines the [`Config`] type and the logic for loading it from a project
//! file. The project file may be TOML (the default) or YAML (when the file
//! extension is `.yaml` or `.yml`).

use serde::Deserialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
struct PageSize(usize);
impl Default for PageSize {
    fn default() -> Self {
        PageSize(10)
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
struct PreviewLength(usize);
impl Default for PreviewLength {
    fn default() -> Self {
        PreviewLength(50)
    }
}

/// The on-disk shape of a project file. Keys are PascalCase so that existing
/// project files keep working.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Project {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    keywords: String,
    posts: PathBuf,
    #[serde(default)]
    images: Option<PathBuf>,
    templates: PathBuf,
    public: PathBuf,
    #[serde(default)]
    preview_length: PreviewLength,
    #[serde(default)]
    posts_per_page: PageSize,
    #[serde(default)]
    disqus_shortname: String,
    #[serde(default, rename = "GoogleAnalyticsID")]
    google_analytics_id: String,
}

/// The configuration for a single build. All paths are absolute or relative
/// to the working directory; paths in a project file are resolved against the
/// directory containing that file.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The site title, passed through to templates.
    pub title: String,

    /// The site description, passed through to templates.
    pub description: String,

    /// The site keywords, passed through to templates.
    pub keywords: String,

    /// The directory containing one source file per post.
    pub posts_source_directory: PathBuf,

    /// An optional directory of images copied verbatim into `img/`.
    pub images_source_directory: Option<PathBuf>,

    /// The directory containing the layouts (`<name>.html`, `comments.html`,
    /// `index.html`) and the theme's `css`, `js`, `fonts` and `images`.
    pub templates_directory: PathBuf,

    /// The output directory. It is deleted and recreated on every build.
    pub public_output_directory: PathBuf,

    /// The number of words kept in a post preview.
    pub preview_length: usize,

    /// The number of posts listed on each index page.
    pub posts_per_page: usize,

    pub disqus_shortname: String,
    pub google_analytics_id: String,
}

impl Config {
    /// Loads a [`Config`] from the project file at `path`.
    pub fn from_file(path: &Path) -> Result<Config> {
        if !path.is_file() {
            return Err(Error::NotFound(path.to_owned()));
        }
        let contents = std::fs::read_to_string(path).map_err(|err| Error::Read {
            path: path.to_owned(),
            err,
        })?;

        let root = path.parent().unwrap_or_else(|| Path::new(""));
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Config::from_yaml(&contents, root),
            _ => Config::from_toml(&contents, root),
        };
        config.map_err(|e| e.annotate(path))
    }

    /// Parses a TOML project file. Relative paths are resolved against
    /// `root`.
    pub fn from_toml(contents: &str, root: &Path) -> Result<Config> {
        let project: Project = toml::from_str(contents)?;
        Config::from_project(project, root)
    }

    /// Parses a YAML project file. Relative paths are resolved against
    /// `root`.
    pub fn from_yaml(contents: &str, root: &Path) -> Result<Config> {
        let project: Project = serde_yaml::from_str(contents)?;
        Config::from_project(project, root)
    }

    fn from_project(project: Project, root: &Path) -> Result<Config> {
        if project.posts_per_page.0 < 1 {
            return Err(Error::Invalid(String::from(
                "`PostsPerPage` must be at least 1",
            )));
        }

        if project.public.as_os_str().is_empty() {
            return Err(Error::Invalid(String::from("`Public` must not be empty")));
        }

        let posts = root.join(project.posts);
        let templates = root.join(project.templates);
        let public = root.join(project.public);

        // The output directory is wiped on every build, so it must not hold
        // any of the project's sources.
        let output = normalize(&public);
        let sources = [
            ("project", root),
            ("Posts", posts.as_path()),
            ("Templates", templates.as_path()),
        ];
        for (key, dir) in sources.iter() {
            if normalize(dir).starts_with(&output) {
                return Err(Error::Invalid(format!(
                    "`Public` (`{}`) must not contain the {} directory (`{}`)",
                    public.display(),
                    key,
                    dir.display()
                )));
            }
        }

        Ok(Config {
            title: project.title,
            description: project.description,
            keywords: project.keywords,
            posts_source_directory: posts,
            images_source_directory: project.images.map(|dir| root.join(dir)),
            templates_directory: templates,
            public_output_directory: public,
            preview_length: project.preview_length.0,
            posts_per_page: project.posts_per_page.0,
            disqus_shortname: project.disqus_shortname,
            google_analytics_id: project.google_analytics_id,
        })
    }
}

/// Folds `.` and `..` components out of `path` without touching the file
/// system.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            _ => normalized.push(component),
        }
    }
    normalized
}

/// The result of loading a [`Config`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading a [`Config`].
#[derive(Debug)]
pub enum Error {
    /// Returned when the project file does not exist.
    NotFound(PathBuf),

    /// Returned when the project file exists but can't be read.
    Read { path: PathBuf, err: std::io::Error },

    /// Returned when the project file isn't valid TOML.
    Toml(toml::de::Error),

    /// Returned when the project file isn't valid YAML.
    Yaml(serde_yaml::Error),

    /// Returned when the project file parses but holds unusable values.
    Invalid(String),

    /// An error with the path of the offending project file.
    Annotated(PathBuf, Box<Error>),
}

impl Error {
    fn annotate(self, path: &Path) -> Error {
        Error::Annotated(path.to_owned(), Box::new(self))
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Error::Read { path, err } => {
                write!(f, "Reading config file '{}': {}", path.display(), err)
            }
            Error::Toml(err) => fmt::Display::fmt(err, f),
            Error::Yaml(err) => fmt::Display::fmt(err, f),
            Error::Invalid(msg) => fmt::Display::fmt(msg, f),
            Error::Annotated(path, err) => {
                write!(f, "loading config `{}`: {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NotFound(_) => None,
            Error::Read { path: _, err } => Some(err),
            Error::Toml(err) => Some(err),
            Error::Yaml(err) => Some(err),
            Error::Invalid(_) => None,
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<toml::de::Error> for Error {
    /// Converts a [`toml::de::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`toml`] deserialization functions.
    fn from(err: toml::de::Error) -> Error {
        Error::Toml(err)
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::Yaml(err)
    }
}
