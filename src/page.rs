//! Pagination of the post index. Index pages are transient: they are built,
//! rendered, and dropped within a single build.

use crate::post::Post;
use std::path::{Path, PathBuf};

/// One page of the post index.
#[derive(Debug, PartialEq)]
pub struct IndexPage<'a> {
    /// The page's position, starting at 0.
    pub number: usize,

    /// The posts listed on this page, most recent first.
    pub posts: &'a [&'a Post],

    /// The site-relative URL of this page.
    pub url: String,

    /// The URL of the previous page, if any.
    pub prev: Option<String>,

    /// The URL of the next page, if any.
    pub next: Option<String>,
}

impl IndexPage<'_> {
    /// Where the page is written beneath the output directory `root`:
    /// `{root}/index.html` for the first page and `{root}/p/{n}/index.html`
    /// for the rest.
    pub fn output_path(&self, root: &Path) -> PathBuf {
        match self.number {
            0 => root.join("index.html"),
            n => root.join("p").join(n.to_string()).join("index.html"),
        }
    }
}

/// The URL of the `n`th index page.
pub fn page_url(n: usize) -> String {
    match n {
        0 => String::from("/"),
        n => format!("/p/{}", n),
    }
}

/// Splits `posts` into pages of `posts_per_page` posts (the last page may be
/// shorter). No posts means no pages. `posts_per_page` must be at least 1.
pub fn paginate<'a>(posts: &'a [&'a Post], posts_per_page: usize) -> Vec<IndexPage<'a>> {
    let total_pages = match posts.len() % posts_per_page {
        0 => posts.len() / posts_per_page,
        _ => posts.len() / posts_per_page + 1,
    };

    posts
        .chunks(posts_per_page)
        .enumerate()
        .map(|(i, chunk)| IndexPage {
            number: i,
            posts: chunk,
            url: page_url(i),
            prev: match i {
                0 => None,
                _ => Some(page_url(i - 1)),
            },
            next: match i < total_pages - 1 {
                false => None,
                true => Some(page_url(i + 1)),
            },
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn posts(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| {
                let source = format!(
                    "Author: A\nDate: 01-{:02}-2020 10:00\nTitle: {}\nTemplate: post\n\nbody",
                    i + 1,
                    i
                );
                Post::parse(&source, Path::new("p.md"), 50).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_paginate_seven_by_three() {
        let owned = posts(7);
        let refs: Vec<&Post> = owned.iter().collect();
        let pages = paginate(&refs, 3);

        let sizes: Vec<usize> = pages.iter().map(|p| p.posts.len()).collect();
        assert_eq!(vec![3, 3, 1], sizes);

        assert_eq!("/", pages[0].url);
        assert_eq!(None, pages[0].prev);
        assert_eq!(Some(String::from("/p/1")), pages[0].next);

        assert_eq!("/p/1", pages[1].url);
        assert_eq!(Some(String::from("/")), pages[1].prev);
        assert_eq!(Some(String::from("/p/2")), pages[1].next);

        assert_eq!("/p/2", pages[2].url);
        assert_eq!(Some(String::from("/p/1")), pages[2].prev);
        assert_eq!(None, pages[2].next);

        // every post lands on exactly one page, in order
        let flattened: Vec<&Post> =
            pages.iter().flat_map(|p| p.posts.iter().copied()).collect();
        assert_eq!(refs, flattened);
    }

    #[test]
    fn test_paginate_single_page() {
        let owned = posts(3);
        let refs: Vec<&Post> = owned.iter().collect();
        let pages = paginate(&refs, 3);
        assert_eq!(1, pages.len());
        assert_eq!("/", pages[0].url);
        assert_eq!(None, pages[0].prev);
        assert_eq!(None, pages[0].next);
    }

    #[test]
    fn test_paginate_empty() {
        assert!(paginate(&[], 3).is_empty());
    }

    #[test]
    fn test_output_path() {
        let owned = posts(2);
        let refs: Vec<&Post> = owned.iter().collect();
        let pages = paginate(&refs, 1);
        let root = Path::new("/public");
        assert_eq!(PathBuf::from("/public/index.html"), pages[0].output_path(root));
        assert_eq!(
            PathBuf::from("/public/p/1/index.html"),
            pages[1].output_path(root)
        );
    }
}
