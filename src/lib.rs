//! The library code for the `quire` static site generator. A build is a
//! single pass over a project:
//!
//! 1. Loading the project file ([`crate::config`])
//! 2. Parsing posts from source files on disk ([`crate::parser`],
//!    [`crate::post`])
//! 3. Converting the posts into output files on disk ([`crate::write`])
//!
//! The third step renders every post with its own layout, then sorts the
//! dated posts (most recent first), paginates them ([`crate::page`]) and
//! renders each index page. [`crate::build::build_site`] ties the steps
//! together and copies the theme's static assets along the way.
//!
//! Templates use Go template syntax. See [`crate::value`] for the values
//! exposed to them.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod logger;
pub mod markdown;
pub mod page;
pub mod parser;
pub mod post;
pub mod site;
pub mod template;
pub mod value;
pub mod write;
