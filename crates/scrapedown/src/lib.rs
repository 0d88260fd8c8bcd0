//! # scrapedown
//!
//! Convert scraped web pages to Markdown.
//!
//! ## Design
//!
//! The converter walks a CDP-style [`Node`] tree and dispatches on a closed
//! set of tag categories ([`TagKind`]), each mapped to a handler. Anything it
//! does not recognize falls back to a generic rule, so conversion never
//! fails. On top of that, [`MarkdownConverter::scrape_page`] assembles a
//! whole page: optional title, URL and meta lines, the main content with
//! boilerplate stripped, and a timestamp footer.
//!
//! Text is copied into the output verbatim. Markdown metacharacters such as
//! `*`, `#` or `|` in page text are not escaped.
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use scrapedown::{MarkdownConverter, Node};
//!
//! let converter = MarkdownConverter::new();
//! let list = Node::element("ul")
//!     .with_child(Node::element_with_text("li", "a"))
//!     .with_child(Node::element_with_text("li", "b"));
//!
//! assert_eq!(converter.convert(&list), "- a\n- b\n\n");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use scrapedown::MarkdownConverter;
//!
//! let converter = MarkdownConverter::new();
//! let markdown = converter.convert_html("<h2>Title</h2><p>Hello <b>world</b></p>");
//! assert_eq!(markdown, "## Title\n\nHello **world**\n\n");
//! ```

mod converter;
#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod options;
pub mod page;
mod rules;
pub mod selector;
mod tag;
pub mod utilities;

pub use converter::MarkdownConverter;
#[cfg(feature = "html")]
pub use html::parse_html;
pub use node::{Node, NodeType};
pub use options::ConversionOptions;
pub use page::{Document, PageLayout, PageMeta};
pub use rules::{render_table, Filter, Rule};
pub use selector::Selector;
pub use tag::TagKind;

/// Error type for scrapedown operations
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
