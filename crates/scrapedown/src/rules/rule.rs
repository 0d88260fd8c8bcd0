//! Rule and Filter types for element conversion.

use crate::converter::MarkdownConverter;
use crate::node::Node;
use crate::options::ConversionOptions;

/// Type alias for replacement functions
pub type ReplacementFn = Box<dyn Fn(&Node, &MarkdownConverter) -> String + Send + Sync>;

/// Type alias for filter predicates
pub type PredicateFn = Box<dyn Fn(&str, &Node, &ConversionOptions) -> bool + Send + Sync>;

/// A filter determines which elements a rule applies to
pub enum Filter {
    /// Match a single tag name
    TagName(String),
    /// Match any of multiple tag names
    TagNames(Vec<String>),
    /// Match using a predicate on (lowercase tag, node, options)
    Predicate(PredicateFn),
}

impl Filter {
    pub fn tag(name: &str) -> Self {
        Filter::TagName(name.to_lowercase())
    }

    pub fn tags(names: &[&str]) -> Self {
        Filter::TagNames(names.iter().map(|s| s.to_lowercase()).collect())
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str, &Node, &ConversionOptions) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    /// Check if this filter matches an element
    pub fn matches(&self, node: &Node, options: &ConversionOptions) -> bool {
        if !node.is_element() {
            return false;
        }
        let tag = node.tag_name();
        match self {
            Filter::TagName(t) => tag == *t,
            Filter::TagNames(tags) => tags.contains(&tag),
            Filter::Predicate(f) => f(&tag, node, options),
        }
    }
}

/// A user-supplied conversion for matched elements.
///
/// The replacement receives the converter so it can recurse into children
/// with the same options and rules.
pub struct Rule {
    pub filter: Filter,
    pub replacement: ReplacementFn,
}

impl Rule {
    pub fn new<F>(filter: Filter, replacement: F) -> Self
    where
        F: Fn(&Node, &MarkdownConverter) -> String + Send + Sync + 'static,
    {
        Self {
            filter,
            replacement: Box::new(replacement),
        }
    }

    /// Create a rule that matches a single tag
    pub fn for_tag<F>(tag: &str, replacement: F) -> Self
    where
        F: Fn(&Node, &MarkdownConverter) -> String + Send + Sync + 'static,
    {
        Self::new(Filter::tag(tag), replacement)
    }

    /// Create a rule that matches multiple tags
    pub fn for_tags<F>(tags: &[&str], replacement: F) -> Self
    where
        F: Fn(&Node, &MarkdownConverter) -> String + Send + Sync + 'static,
    {
        Self::new(Filter::tags(tags), replacement)
    }

    pub fn replace(&self, node: &Node, converter: &MarkdownConverter) -> String {
        (self.replacement)(node, converter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_filters() {
        let options = ConversionOptions::default();
        let aside = Node::element("ASIDE");

        assert!(Filter::tag("aside").matches(&aside, &options));
        assert!(Filter::tags(&["nav", "Aside"]).matches(&aside, &options));
        assert!(!Filter::tag("nav").matches(&aside, &options));
        assert!(!Filter::tag("#text").matches(&Node::text("x"), &options));
    }

    #[test]
    fn test_predicate_sees_options() {
        let filter = Filter::predicate(|tag, _, options| tag == "video" && options.include_images);
        let video = Node::element("video");

        assert!(filter.matches(&video, &ConversionOptions::default()));
        assert!(!filter.matches(&video, &ConversionOptions::plain()));
    }
}
