//! Rule system: the built-in category table plus caller-supplied rules.

mod markdown;
mod rule;

pub use markdown::{builtin_replacement, render_table};
pub use rule::{Filter, Rule};

use indexmap::IndexMap;

use crate::node::Node;
use crate::options::ConversionOptions;

/// Caller-supplied rules, consulted before the built-in table.
#[derive(Default)]
pub struct Rules {
    /// Custom rules in insertion order; re-adding a key replaces the rule
    /// but keeps its position
    custom_rules: IndexMap<String, Rule>,
    /// Elements matching any of these convert to nothing
    remove_rules: Vec<Filter>,
}

impl Rules {
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    pub fn remove(&mut self, filter: Filter) {
        self.remove_rules.push(filter);
    }

    /// First custom rule matching the node, if any
    pub fn for_node<'a>(&'a self, node: &Node, options: &ConversionOptions) -> Option<&'a Rule> {
        self.custom_rules
            .values()
            .find(|rule| rule.filter.matches(node, options))
    }

    /// Whether the node is dropped. A matching custom rule wins over removal.
    pub fn should_remove(&self, node: &Node, options: &ConversionOptions) -> bool {
        if self.for_node(node, options).is_some() {
            return false;
        }
        self.remove_rules
            .iter()
            .any(|filter| filter.matches(node, options))
    }

    pub fn is_empty(&self) -> bool {
        self.custom_rules.is_empty() && self.remove_rules.is_empty()
    }
}
