use crate::config::Config;
use crate::post::Post;

/// The build context: the configuration plus every post ingested from the
/// posts directory, in encounter order. A [`Site`] is read-only once built and
/// is passed explicitly to every rendering step.
#[derive(Debug)]
pub struct Site {
    pub config: Config,
    pub posts: Vec<Post>,
}

impl Site {
    pub fn new(config: Config, posts: Vec<Post>) -> Site {
        Site { config, posts }
    }

    /// Returns the posts that belong on index pages (i.e., everything but
    /// pages), most recent first. Posts with equal dates keep their encounter
    /// order.
    pub fn index_posts(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> =
            self.posts.iter().filter(|p| !p.is_page).collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::{Path, PathBuf};

    fn config() -> Config {
        Config::from_toml(
            "Posts = \"posts\"\nTemplates = \"theme\"\nPublic = \"public\"\n",
            Path::new(""),
        )
        .unwrap()
    }

    fn post(name: &str, date: &str, is_page: bool) -> Post {
        let source = format!(
            "Author: A\nDate: {}\nTitle: {}\nTemplate: post\nPage: {}\n\nbody",
            date, name, is_page
        );
        Post::parse(&source, &PathBuf::from(format!("{}.md", name)), 50).unwrap()
    }

    #[test]
    fn test_index_posts_sorted_and_filtered() {
        let site = Site::new(
            config(),
            vec![
                post("old", "01-01-2019 00:00", false),
                post("about", "01-01-2030 00:00", true),
                post("new", "06-01-2021 12:00", false),
            ],
        );
        let names: Vec<&str> =
            site.index_posts().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(vec!["new", "old"], names);
    }

    #[test]
    fn test_index_posts_sort_is_stable() {
        let site = Site::new(
            config(),
            vec![
                post("first", "03-03-2020 10:00", false),
                post("newest", "04-04-2020 10:00", false),
                post("second", "03-03-2020 10:00", false),
                post("third", "03-03-2020 10:00", false),
            ],
        );
        let names: Vec<&str> =
            site.index_posts().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(vec!["newest", "first", "second", "third"], names);
    }
}
