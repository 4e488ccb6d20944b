use pulldown_cmark::{html, Options, Parser};

/// Converts `markdown` to HTML.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html, Parser::new_ext(markdown, options));
    html
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_paragraph() {
        assert_eq!("<p>Hello world</p>\n", to_html("Hello world"));
    }

    #[test]
    fn test_fenced_code() {
        let html = to_html("```\nlet x = 1;\n```");
        assert_eq!("<pre><code>let x = 1;\n</code></pre>\n", html);
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!("<p><del>gone</del></p>\n", to_html("~~gone~~"));
    }
}
