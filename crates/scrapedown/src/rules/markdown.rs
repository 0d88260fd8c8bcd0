//! Built-in Markdown rules, one handler per tag category.

use crate::converter::MarkdownConverter;
use crate::node::Node;
use crate::tag::TagKind;

/// Handler signature for built-in categories
pub type BuiltinFn = fn(&Node, &MarkdownConverter) -> String;

/// Alt text used when an image has none
const DEFAULT_ALT: &str = "Image";

/// Header label used for an empty header cell
const DEFAULT_HEADER: &str = "Column";

/// Map a tag category to its handler
pub fn builtin_replacement(kind: TagKind) -> BuiltinFn {
    match kind {
        TagKind::Heading(_) => heading,
        TagKind::Paragraph => paragraph,
        TagKind::LineBreak => line_break,
        TagKind::Strong => strong,
        TagKind::Emphasis => emphasis,
        TagKind::Code => code,
        TagKind::Preformatted => preformatted,
        TagKind::Blockquote => blockquote,
        TagKind::UnorderedList => unordered_list,
        TagKind::OrderedList => ordered_list,
        TagKind::ListItem => list_item,
        TagKind::Link => link,
        TagKind::Image => image,
        TagKind::HorizontalRule => horizontal_rule,
        TagKind::Container => container,
        TagKind::Table => table,
        TagKind::Generic => generic,
    }
}

fn heading(node: &Node, _: &MarkdownConverter) -> String {
    let level = match node.kind() {
        TagKind::Heading(level) => level,
        _ => 1,
    };
    format!("{} {}\n\n", "#".repeat(level as usize), node.trimmed_text())
}

fn paragraph(node: &Node, converter: &MarkdownConverter) -> String {
    format!("{}\n\n", converter.inline_content(node).trim())
}

fn line_break(_: &Node, _: &MarkdownConverter) -> String {
    "  \n".to_string()
}

fn strong(node: &Node, _: &MarkdownConverter) -> String {
    format!("**{}**", node.trimmed_text())
}

fn emphasis(node: &Node, _: &MarkdownConverter) -> String {
    format!("*{}*", node.trimmed_text())
}

fn code(node: &Node, _: &MarkdownConverter) -> String {
    format!("`{}`", node.trimmed_text())
}

fn preformatted(node: &Node, _: &MarkdownConverter) -> String {
    let source = node.find_descendant("code").unwrap_or(node);
    format!("```\n{}\n```\n\n", source.trimmed_text())
}

fn blockquote(node: &Node, converter: &MarkdownConverter) -> String {
    let content = converter.inline_content(node);
    let quoted: Vec<String> = content
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect();
    format!("{}\n\n", quoted.join("\n"))
}

fn unordered_list(node: &Node, converter: &MarkdownConverter) -> String {
    render_list(node, converter, |_| "-".to_string())
}

fn ordered_list(node: &Node, converter: &MarkdownConverter) -> String {
    render_list(node, converter, |index| format!("{}.", index + 1))
}

/// Render direct `li` children with a marker per item, then a blank line.
/// The index passed to `marker` counts list items only, starting at 0 for
/// every list.
fn render_list<F>(node: &Node, converter: &MarkdownConverter, marker: F) -> String
where
    F: Fn(usize) -> String,
{
    let mut out = String::new();
    let items = node
        .element_children()
        .filter(|child| child.kind() == TagKind::ListItem);

    for (index, item) in items.enumerate() {
        out.push_str(&marker(index));
        out.push(' ');
        out.push_str(converter.inline_content(item).trim());
        out.push('\n');
    }

    out.push('\n');
    out
}

fn list_item(node: &Node, converter: &MarkdownConverter) -> String {
    format!("{}\n", converter.inline_content(node))
}

fn link(node: &Node, converter: &MarkdownConverter) -> String {
    let text = node.trimmed_text();
    if !converter.options().include_links || text.is_empty() {
        return text;
    }

    match node.attr("href").map(|href| converter.resolve_url(href)) {
        Some(href) if !href.is_empty() && href != text => format!("[{}]({})", text, href),
        _ => text,
    }
}

fn image(node: &Node, converter: &MarkdownConverter) -> String {
    if !converter.options().include_images {
        return String::new();
    }

    let src = match node.attr("src").map(|src| converter.resolve_url(src)) {
        Some(src) if !src.is_empty() => src,
        _ => return String::new(),
    };
    let alt = node.attr("alt").filter(|a| !a.is_empty()).unwrap_or(DEFAULT_ALT);

    match node.attr("title").filter(|t| !t.is_empty()) {
        Some(title) => format!("![{}]({} \"{}\")", alt, src, title),
        None => format!("![{}]({})", alt, src),
    }
}

fn horizontal_rule(_: &Node, _: &MarkdownConverter) -> String {
    "---\n\n".to_string()
}

fn container(node: &Node, converter: &MarkdownConverter) -> String {
    converter.children_content(node)
}

fn table(node: &Node, _: &MarkdownConverter) -> String {
    format!("{}\n\n", render_table(node))
}

fn generic(node: &Node, converter: &MarkdownConverter) -> String {
    if node.has_element_children() {
        converter.children_content(node)
    } else {
        node.trimmed_text()
    }
}

/// Render a pipe table from every `tr` below `table`.
///
/// The first row is the header; empty header cells become `Column`. Body
/// cells are trimmed text with no substitution. A table with no rows renders
/// as the empty string.
pub fn render_table(table: &Node) -> String {
    let mut rows = table.find_all("tr");
    let Some(header_row) = rows.next() else {
        return String::new();
    };

    let headers: Vec<String> = header_row
        .element_children()
        .map(|cell| {
            let text = cell.trimmed_text();
            if text.is_empty() {
                DEFAULT_HEADER.to_string()
            } else {
                text
            }
        })
        .collect();

    let mut out = String::new();
    push_row(&mut out, &headers);
    push_row(&mut out, &vec!["---".to_string(); headers.len()]);

    for row in rows {
        let cells: Vec<String> = row.element_children().map(Node::trimmed_text).collect();
        push_row(&mut out, &cells);
    }

    out
}

fn push_row(out: &mut String, cells: &[String]) {
    out.push_str("| ");
    out.push_str(&cells.join(" | "));
    out.push_str(" |\n");
}
