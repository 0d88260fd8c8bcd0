//! HTML parsing support.
//!
//! Parses HTML strings with `scraper` (html5ever) and converts the result to
//! the [`Node`] tree the converter works on, standing in for the live DOM a
//! browser would provide.

use std::io::Read;

use scraper::{ElementRef, Html, Node as ScraperNode, Selector as CssSelector};
use url::Url;

use crate::node::Node;
use crate::page::{Document, PageMeta};
use crate::{Result, ScrapeError};

/// Deepest element nesting kept as structure, the same cap browsers apply
/// while building the DOM. Elements below it are flattened into their
/// ancestor at the cap, so every walk over the tree stays bounded.
pub const MAX_DEPTH: usize = 512;

/// Parse an HTML fragment into a Node tree rooted at the `<html>` element.
///
/// # Example
///
/// ```rust
/// use scrapedown::{parse_html, MarkdownConverter};
///
/// let node = parse_html("<h1>Hello <em>World</em></h1>");
/// let markdown = MarkdownConverter::new().convert(&node);
/// assert_eq!(markdown, "# Hello World\n\n");
/// ```
pub fn parse_html(html: &str) -> Node {
    let fragment = Html::parse_fragment(html);
    scraper_to_node(fragment.root_element())
}

impl Document {
    /// Parse a full HTML document.
    ///
    /// `url` is the address the page was loaded from; it must be absolute.
    /// Title and `description`/`keywords`/`author` meta tags are extracted,
    /// and the `<body>` becomes [`Document::body`].
    pub fn parse(html: &str, url: Option<&str>) -> Result<Self> {
        if let Some(url) = url {
            Url::parse(url).map_err(|e| ScrapeError::InvalidUrl(format!("{url}: {e}")))?;
        }

        let html = Html::parse_document(html);
        let body = select_first(&html, "body")
            .map(scraper_to_node)
            .unwrap_or_else(|| Node::element("body"));

        let title = select_first(&html, "title")
            .map(|t| t.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            title,
            url: url.map(str::to_string),
            meta: PageMeta {
                description: meta_content(&html, "description"),
                keywords: meta_content(&html, "keywords"),
                author: meta_content(&html, "author"),
            },
            body,
        })
    }

    /// Read a whole document from `reader` and parse it, see [`Document::parse`]
    pub fn read_from<R: Read>(mut reader: R, url: Option<&str>) -> Result<Self> {
        let mut html = String::new();
        reader.read_to_string(&mut html)?;
        Self::parse(&html, url)
    }
}

fn select_first<'a>(html: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = CssSelector::parse(css).ok()?;
    html.select(&selector).next()
}

/// `content` of `<meta name="{name}">`, when present and non-empty
fn meta_content(html: &Html, name: &str) -> Option<String> {
    select_first(html, &format!("meta[name=\"{name}\"]"))
        .and_then(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    element_to_node(element, 0)
}

fn element_to_node(element: ElementRef, depth: usize) -> Node {
    let tag = element.value().name();
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut node = Node::element_with_attrs(tag, attrs);

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Element(_) => {
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                if depth + 1 < MAX_DEPTH {
                    node.add_child(element_to_node(child_element, depth + 1));
                } else {
                    flatten_into(&mut node, child_element);
                }
            }
            _ => {}
        }
    }

    node
}

/// Keep only the text of a subtree below [`MAX_DEPTH`], appended to `node`.
/// `ElementRef::text` walks the subtree without recursion.
fn flatten_into(node: &mut Node, element: ElementRef) {
    for text in element.text() {
        node.add_child(Node::text(text));
    }
}
