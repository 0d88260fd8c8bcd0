//! Minimal selectors for locating content and boilerplate in a [`Node`] tree.
//!
//! Only the simple forms the page heuristics need are supported: a tag name
//! (`main`), a class (`.content`), an id (`#content`) and an attribute
//! equality test (`[role="main"]`).

use std::fmt;
use std::str::FromStr;

use crate::node::Node;
use crate::ScrapeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Tag(String),
    Class(String),
    Id(String),
    Attr { name: String, value: String },
}

impl Selector {
    /// Whether a single element matches
    pub fn matches(&self, node: &Node) -> bool {
        if !node.is_element() {
            return false;
        }
        match self {
            Selector::Tag(tag) => node.tag_name() == *tag,
            Selector::Class(class) => node.has_class(class),
            Selector::Id(id) => node.attr("id") == Some(id.as_str()),
            Selector::Attr { name, value } => node.attr(name) == Some(value.as_str()),
        }
    }

    /// First match in document order, `root` included (like
    /// `document.querySelector` when `root` is the body)
    pub fn find_first<'a>(&self, root: &'a Node) -> Option<&'a Node> {
        if self.matches(root) {
            return Some(root);
        }
        root.descendants().find(|n| self.matches(n))
    }
}

impl FromStr for Selector {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ScrapeError::InvalidInput(format!("unsupported selector: {s:?}"));

        if let Some(class) = s.strip_prefix('.') {
            return non_empty(class).map(Selector::Class).ok_or_else(invalid);
        }
        if let Some(id) = s.strip_prefix('#') {
            return non_empty(id).map(Selector::Id).ok_or_else(invalid);
        }
        if let Some(body) = s.strip_prefix('[').and_then(|b| b.strip_suffix(']')) {
            let (name, value) = body.split_once('=').ok_or_else(invalid)?;
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            let name = non_empty(name.trim()).ok_or_else(invalid)?;
            return Ok(Selector::Attr {
                name: name.to_lowercase(),
                value: value.to_string(),
            });
        }
        if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Ok(Selector::Tag(s.to_lowercase()));
        }
        Err(invalid())
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Tag(tag) => write!(f, "{tag}"),
            Selector::Class(class) => write!(f, ".{class}"),
            Selector::Id(id) => write!(f, "#{id}"),
            Selector::Attr { name, value } => write!(f, "[{name}=\"{value}\"]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!("main".parse::<Selector>().unwrap(), Selector::Tag("main".into()));
        assert_eq!(
            ".post-content".parse::<Selector>().unwrap(),
            Selector::Class("post-content".into())
        );
        assert_eq!("#content".parse::<Selector>().unwrap(), Selector::Id("content".into()));
        assert_eq!(
            r#"[role="main"]"#.parse::<Selector>().unwrap(),
            Selector::Attr { name: "role".into(), value: "main".into() }
        );
    }

    #[test]
    fn test_parse_rejects_compound() {
        assert!("div > p".parse::<Selector>().is_err());
        assert!(".".parse::<Selector>().is_err());
        assert!("[role]".parse::<Selector>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for s in ["main", ".menu", "#main-content", "[role=\"main\"]"] {
            assert_eq!(s.parse::<Selector>().unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_find_first_includes_root() {
        let body = Node::element("body")
            .with_child(Node::element_with_attrs("div", vec![("id", "content")]))
            .with_child(Node::element_with_attrs(
                "div",
                vec![("class", "content"), ("role", "main")],
            ));

        let body_sel: Selector = "body".parse().unwrap();
        assert!(std::ptr::eq(body_sel.find_first(&body).unwrap(), &body));

        let by_class: Selector = ".content".parse().unwrap();
        assert_eq!(by_class.find_first(&body).and_then(|n| n.attr("role")), Some("main"));

        let missing: Selector = "article".parse().unwrap();
        assert!(missing.find_first(&body).is_none());
    }
}
