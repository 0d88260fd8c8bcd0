//! CDP-style element tree consumed by the Markdown converter.
//!
//! Any HTML source (html5ever via [`crate::html`], a CDP `DOM.getDocument`
//! dump, a hand-built tree in tests) can be expressed as [`Node`]s. The
//! converter only ever reads this tree; the page stripping step works on a
//! clone.

use crate::tag::TagKind;

/// Node types matching DOM nodeType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (nodeType = 1)
    Element = 1,
    /// Text node (nodeType = 3)
    Text = 3,
    /// Comment node (nodeType = 8)
    Comment = 8,
    /// Document node (nodeType = 9)
    Document = 9,
    /// Document fragment node (nodeType = 11)
    DocumentFragment = 11,
}

/// A node in the content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Node type (1 = Element, 3 = Text, etc.)
    pub node_type: NodeType,

    /// Node name (uppercase for elements, e.g. "DIV", "#text" for text nodes)
    pub node_name: String,

    /// Text content for text and comment nodes
    pub node_value: Option<String>,

    /// Attributes as flat array [name, value, name, value, ...] (CDP style)
    pub attributes: Option<Vec<String>>,

    /// Child nodes
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_uppercase(),
            node_value: None,
            attributes: Some(Vec::new()),
            children: Some(Vec::new()),
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut node = Self::element(tag_name);
        for (name, value) in attrs {
            node.set_attr(name, value);
        }
        node
    }

    /// Create an element holding a single text child, e.g. `<b>text</b>`.
    pub fn element_with_text(tag_name: &str, text: &str) -> Self {
        let mut node = Self::element(tag_name);
        node.add_child(Node::text(text));
        node
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self {
            node_type: NodeType::Text,
            node_name: "#text".to_string(),
            node_value: Some(content.to_string()),
            attributes: None,
            children: None,
        }
    }

    /// Create a comment node
    pub fn comment(content: &str) -> Self {
        Self {
            node_type: NodeType::Comment,
            node_name: "#comment".to_string(),
            node_value: Some(content.to_string()),
            attributes: None,
            children: None,
        }
    }

    /// Create a document fragment node
    pub fn document_fragment() -> Self {
        Self {
            node_type: NodeType::DocumentFragment,
            node_name: "#document-fragment".to_string(),
            node_value: None,
            attributes: None,
            children: Some(Vec::new()),
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get the tag name (lowercase)
    pub fn tag_name(&self) -> String {
        self.node_name.to_lowercase()
    }

    /// Category used to pick a conversion rule. Non-elements are `Generic`.
    pub fn kind(&self) -> TagKind {
        if self.is_element() {
            TagKind::from_tag(&self.node_name)
        } else {
            TagKind::Generic
        }
    }

    /// Get an attribute value by name (case-insensitive)
    pub fn attr(&self, name: &str) -> Option<&str> {
        let attrs = self.attributes.as_ref()?;
        attrs
            .chunks_exact(2)
            .find(|pair| pair[0].eq_ignore_ascii_case(name))
            .map(|pair| pair[1].as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Whether the whitespace-separated `class` attribute contains `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Set an attribute, replacing an existing value of the same name
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let attrs = self.attributes.get_or_insert_with(Vec::new);
        if let Some(pair) = attrs
            .chunks_exact_mut(2)
            .find(|pair| pair[0].eq_ignore_ascii_case(name))
        {
            pair[1] = value.to_string();
            return;
        }
        attrs.push(name.to_string());
        attrs.push(value.to_string());
    }

    /// All child nodes, text included
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().flat_map(|c| c.iter())
    }

    /// Only element children (the DOM `children` collection)
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    pub fn has_element_children(&self) -> bool {
        self.element_children().next().is_some()
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        self.children.get_or_insert_with(Vec::new).push(child);
    }

    /// Builder-style [`Node::add_child`]
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// Descendant elements in document (pre-order) order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.element_children().collect::<Vec<_>>().into_iter().rev().collect(),
        }
    }

    /// First descendant element with the given tag name
    pub fn find_descendant(&self, tag: &str) -> Option<&Node> {
        self.descendants().find(|n| n.tag_name() == tag)
    }

    /// Every descendant element with the given tag name, in document order
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.descendants().filter(move |n| n.tag_name() == tag)
    }

    /// Drop every descendant for which `remove` returns true, returning how
    /// many subtrees were removed. `self` is never removed.
    pub fn remove_descendants<F>(&mut self, remove: &F) -> usize
    where
        F: Fn(&Node) -> bool,
    {
        let Some(children) = self.children.as_mut() else {
            return 0;
        };

        let before = children.len();
        children.retain(|child| !(child.is_element() && remove(child)));
        let mut removed = before - children.len();

        for child in children.iter_mut() {
            removed += child.remove_descendants(remove);
        }
        removed
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self.node_type {
            NodeType::Text => self.node_value.clone().unwrap_or_default(),
            NodeType::Comment => String::new(),
            _ => {
                let mut out = String::new();
                self.collect_text(&mut out);
                out
            }
        }
    }

    fn collect_text(&self, out: &mut String) {
        for child in self.children() {
            match child.node_type {
                NodeType::Text => out.push_str(child.node_value.as_deref().unwrap_or("")),
                NodeType::Comment => {}
                _ => child.collect_text(out),
            }
        }
    }

    /// Text content with surrounding whitespace removed
    pub fn trimmed_text(&self) -> String {
        self.text_content().trim().to_string()
    }
}

/// Pre-order iterator over descendant elements, see [`Node::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let children: Vec<&Node> = node.element_children().collect();
        self.stack.extend(children.into_iter().rev());
        Some(node)
    }
}
