//! Tag categories recognized by the converter.

/// Closed set of element categories. Anything unrecognized is `Generic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `h1`..`h6`, carrying the level
    Heading(u8),
    Paragraph,
    LineBreak,
    /// `b`, `strong`
    Strong,
    /// `i`, `em`
    Emphasis,
    Code,
    Preformatted,
    Blockquote,
    UnorderedList,
    OrderedList,
    ListItem,
    Link,
    Image,
    HorizontalRule,
    /// `div`, `section`, `article`, `main`
    Container,
    Table,
    Generic,
}

impl TagKind {
    /// Map a tag name (any case) to its category
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "h1" => TagKind::Heading(1),
            "h2" => TagKind::Heading(2),
            "h3" => TagKind::Heading(3),
            "h4" => TagKind::Heading(4),
            "h5" => TagKind::Heading(5),
            "h6" => TagKind::Heading(6),
            "p" => TagKind::Paragraph,
            "br" => TagKind::LineBreak,
            "strong" | "b" => TagKind::Strong,
            "em" | "i" => TagKind::Emphasis,
            "code" => TagKind::Code,
            "pre" => TagKind::Preformatted,
            "blockquote" => TagKind::Blockquote,
            "ul" => TagKind::UnorderedList,
            "ol" => TagKind::OrderedList,
            "li" => TagKind::ListItem,
            "a" => TagKind::Link,
            "img" => TagKind::Image,
            "hr" => TagKind::HorizontalRule,
            "div" | "section" | "article" | "main" => TagKind::Container,
            "table" => TagKind::Table,
            _ => TagKind::Generic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        for level in 1..=6u8 {
            assert_eq!(TagKind::from_tag(&format!("H{level}")), TagKind::Heading(level));
        }
        assert_eq!(TagKind::from_tag("h7"), TagKind::Generic);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(TagKind::from_tag("b"), TagKind::from_tag("strong"));
        assert_eq!(TagKind::from_tag("i"), TagKind::from_tag("EM"));
        assert_eq!(TagKind::from_tag("article"), TagKind::Container);
    }

    #[test]
    fn test_unknown_is_generic() {
        assert_eq!(TagKind::from_tag("span"), TagKind::Generic);
        assert_eq!(TagKind::from_tag("aside"), TagKind::Generic);
    }
}
