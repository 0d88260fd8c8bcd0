//! Page-level assembly: front matter, main content selection, boilerplate
//! stripping and the scrape footer.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::converter::MarkdownConverter;
use crate::node::Node;
use crate::selector::Selector;
use crate::utilities::collapse_newlines;

/// Format of the timestamp in the `Scraped on` footer
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Title used when the document has none
pub const UNTITLED_PAGE: &str = "Untitled Page";

/// A candidate is accepted as main content when its trimmed text is longer
/// than this many characters
pub const MIN_CONTENT_CHARS: usize = 100;

/// Document-level metadata from `<meta name=...>` tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub author: Option<String>,
}

impl PageMeta {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.keywords.is_none() && self.author.is_none()
    }
}

/// A page ready for assembly.
#[derive(Debug, Clone)]
pub struct Document {
    pub title: Option<String>,
    /// Address the page was loaded from
    pub url: Option<String>,
    pub meta: PageMeta,
    /// The `<body>` subtree
    pub body: Node,
}

impl Document {
    pub fn new(body: Node) -> Self {
        Self {
            title: None,
            url: None,
            meta: PageMeta::default(),
            body,
        }
    }
}

/// Where to look for content and what to throw away before converting.
#[derive(Debug, Clone)]
pub struct PageLayout {
    /// Tried in order; the first match of each is a main content candidate
    pub content_selectors: Vec<Selector>,
    /// Descendants matching any of these are removed before conversion
    pub boilerplate_selectors: Vec<Selector>,
    pub min_content_chars: usize,
}

impl Default for PageLayout {
    fn default() -> Self {
        let tag = |t: &str| Selector::Tag(t.to_string());
        let class = |c: &str| Selector::Class(c.to_string());
        let id = |i: &str| Selector::Id(i.to_string());

        Self {
            content_selectors: vec![
                tag("main"),
                tag("article"),
                Selector::Attr {
                    name: "role".to_string(),
                    value: "main".to_string(),
                },
                class("main-content"),
                id("main-content"),
                class("content"),
                id("content"),
                class("post-content"),
                class("entry-content"),
                tag("body"),
            ],
            boilerplate_selectors: vec![
                tag("script"),
                tag("style"),
                tag("nav"),
                tag("header"),
                tag("footer"),
                class("navigation"),
                class("menu"),
                class("sidebar"),
                class("ads"),
                class("advertisement"),
                class("social-share"),
                class("comments"),
            ],
            min_content_chars: MIN_CONTENT_CHARS,
        }
    }
}

impl PageLayout {
    /// Pick the main content element below `body`, falling back to `body`.
    pub fn main_content<'a>(&self, body: &'a Node) -> &'a Node {
        let candidates = self.content_selectors.iter().filter_map(|selector| {
            let found = selector.find_first(body);
            if found.is_some() {
                debug!(%selector, "content candidate");
            }
            found
        });

        select_main_content(candidates, body, |node| {
            has_substantial_text(node, self.min_content_chars)
        })
    }

    /// Remove boilerplate descendants in place, returning how many were removed.
    pub fn strip_boilerplate(&self, node: &mut Node) -> usize {
        node.remove_descendants(&|n: &Node| {
            self.boilerplate_selectors.iter().any(|s| s.matches(n))
        })
    }
}

/// First candidate accepted by `accept`, or `root` when none is.
pub fn select_main_content<'a, I, P>(candidates: I, root: &'a Node, accept: P) -> &'a Node
where
    I: IntoIterator<Item = &'a Node>,
    P: Fn(&Node) -> bool,
{
    candidates
        .into_iter()
        .find(|node| accept(node))
        .unwrap_or(root)
}

/// Whether the trimmed text of `node` is longer than `min_chars`
pub fn has_substantial_text(node: &Node, min_chars: usize) -> bool {
    node.trimmed_text().chars().count() > min_chars
}

impl MarkdownConverter {
    /// Assemble a whole page with the default [`PageLayout`].
    pub fn scrape_page(&self, document: &Document, scraped_at: NaiveDateTime) -> String {
        self.scrape_page_with(document, &PageLayout::default(), scraped_at)
    }

    /// Assemble a whole page.
    ///
    /// Front matter is controlled by `include_title`, `include_url` and
    /// `include_meta`. The body is the main content element, stripped of
    /// boilerplate on a copy, then converted. Runs of three or more newlines
    /// collapse to two and a `Scraped on` footer is appended.
    pub fn scrape_page_with(
        &self,
        document: &Document,
        layout: &PageLayout,
        scraped_at: NaiveDateTime,
    ) -> String {
        let options = self.options();
        let mut markdown = String::new();

        if options.include_title {
            let title = document
                .title
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or(UNTITLED_PAGE);
            markdown.push_str(&format!("# {}\n\n", title));
        }

        if options.include_url {
            if let Some(url) = &document.url {
                markdown.push_str(&format!("**URL:** {}\n\n", url));
            }
        }

        if options.include_meta && !document.meta.is_empty() {
            let meta = &document.meta;
            markdown.push_str("## Meta Information\n\n");
            for (label, value) in [
                ("Description", &meta.description),
                ("Keywords", &meta.keywords),
                ("Author", &meta.author),
            ] {
                if let Some(value) = value {
                    markdown.push_str(&format!("**{}:** {}\n\n", label, value));
                }
            }
        }

        markdown.push_str("## Content\n\n");

        let mut content = layout.main_content(&document.body).clone();
        let removed = layout.strip_boilerplate(&mut content);
        debug!(tag = %content.tag_name(), removed, "converting main content");
        markdown.push_str(&self.convert(&content));

        let mut markdown = collapse_newlines(&markdown).trim().to_string();
        markdown.push_str(&format!(
            "\n\n---\n*Scraped on {}*",
            scraped_at.format(TIMESTAMP_FORMAT)
        ));
        markdown
    }
}
