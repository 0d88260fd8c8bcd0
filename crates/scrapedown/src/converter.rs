//! MarkdownConverter - the entry point for element tree to Markdown conversion.

use tracing::trace;
use url::Url;

use crate::node::{Node, NodeType};
use crate::options::ConversionOptions;
use crate::rules::{builtin_replacement, Filter, Rule, Rules};
use crate::{Result, ScrapeError};

/// Converts element trees to Markdown.
///
/// Conversion is a pure function of the subtree, the options and the
/// optional base URL. The tree is never modified and every call builds a
/// fresh string, so one converter can be shared freely.
#[derive(Default)]
pub struct MarkdownConverter {
    options: ConversionOptions,
    rules: Rules,
    base_url: Option<Url>,
}

impl MarkdownConverter {
    /// Create a converter with default options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConversionOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Resolve relative `href`/`src` values against `base`, the way a browser
    /// reports `element.href` for the page at that address.
    pub fn with_base_url(mut self, base: &str) -> Result<Self> {
        let url = Url::parse(base).map_err(|e| ScrapeError::InvalidUrl(format!("{base}: {e}")))?;
        self.base_url = Some(url);
        Ok(self)
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut ConversionOptions {
        &mut self.options
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Add a custom rule, checked before the built-in category rules
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Convert elements matching the filter to nothing
    pub fn remove(&mut self, filter: Filter) -> &mut Self {
        self.rules.remove(filter);
        self
    }

    /// Convert a node (or nothing) to Markdown.
    ///
    /// `None` yields the empty string. A bare text node yields its trimmed
    /// text, a document or fragment the concatenation of its element
    /// children.
    pub fn convert<'a>(&self, node: impl Into<Option<&'a Node>>) -> String {
        let Some(node) = node.into() else {
            return String::new();
        };

        match node.node_type {
            NodeType::Element => self.convert_element(node),
            NodeType::Text => node.trimmed_text(),
            NodeType::Comment => String::new(),
            NodeType::Document | NodeType::DocumentFragment => self.children_content(node),
        }
    }

    /// Parse an HTML fragment and convert it
    #[cfg(feature = "html")]
    pub fn convert_html(&self, html: &str) -> String {
        self.convert(&crate::html::parse_html(html))
    }

    fn convert_element(&self, node: &Node) -> String {
        if !self.rules.is_empty() {
            if self.rules.should_remove(node, &self.options) {
                return String::new();
            }
            if let Some(rule) = self.rules.for_node(node, &self.options) {
                trace!(tag = %node.tag_name(), "custom rule");
                return rule.replace(node, self);
            }
        }

        builtin_replacement(node.kind())(node, self)
    }

    /// Concatenate the output of every element child. Text directly inside
    /// `node` is skipped; use [`MarkdownConverter::inline_content`] to keep it.
    pub fn children_content(&self, node: &Node) -> String {
        node.element_children()
            .map(|child| self.convert_element(child))
            .collect()
    }

    /// Render child nodes in order: text verbatim, elements converted.
    ///
    /// Markdown metacharacters in text are passed through unescaped.
    pub fn inline_content(&self, node: &Node) -> String {
        let mut out = String::new();
        for child in node.children() {
            match child.node_type {
                NodeType::Text => out.push_str(child.node_value.as_deref().unwrap_or("")),
                NodeType::Element => out.push_str(&self.convert_element(child)),
                _ => {}
            }
        }
        out
    }

    /// Resolve a link or image target against the base URL, if any.
    pub fn resolve_url(&self, raw: &str) -> String {
        let raw = raw.trim();
        match &self.base_url {
            Some(base) => base
                .join(raw)
                .map(String::from)
                .unwrap_or_else(|_| raw.to_string()),
            None => raw.to_string(),
        }
    }
}
