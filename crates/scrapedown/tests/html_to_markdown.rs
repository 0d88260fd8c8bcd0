#![cfg(feature = "html")]

use chrono::NaiveDate;
use rstest::rstest;
use scrapedown::{ConversionOptions, Document, MarkdownConverter};

fn convert(html: &str) -> String {
    MarkdownConverter::new().convert_html(html)
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(4)]
#[case(5)]
#[case(6)]
fn test_heading_prefix(#[case] level: usize) {
    let md = convert(&format!("<h{level}>Title</h{level}>"));
    let hashes = "#".repeat(level);
    assert!(md.starts_with(&format!("{hashes} T")));
    assert!(!md.starts_with(&format!("{hashes}#")));
}

#[test]
fn test_heading_and_paragraph() {
    assert_eq!(
        convert("<h2>Title</h2><p>Hello <b>world</b></p>"),
        "## Title\n\nHello **world**\n\n"
    );
}

#[test]
fn test_unordered_list() {
    assert_eq!(convert("<ul><li>a</li><li>b</li></ul>"), "- a\n- b\n\n");
}

#[test]
fn test_sibling_ordered_lists_restart() {
    let md = convert("<ol><li>a</li><li>b</li></ol><p>between</p><ol><li>c</li></ol>");
    assert_eq!(md, "1. a\n2. b\n\nbetween\n\n1. c\n\n");
}

#[test]
fn test_table() {
    let md = convert(
        "<table><tr><th>Name</th><th>Age</th></tr><tr><td>Al</td><td>30</td></tr></table>",
    );
    assert_eq!(md, "| Name | Age |\n| --- | --- |\n| Al | 30 |\n\n\n");
}

#[test]
fn test_table_empty_cells() {
    let md = convert(concat!(
        "<table><thead><tr><th>Name</th><th></th></tr></thead>",
        "<tbody><tr><td>Al</td><td></td></tr></tbody></table>"
    ));
    assert!(md.starts_with("| Name | Column |\n| --- | --- |\n| Al |  |\n"));
}

#[rstest]
#[case(true, "[Docs](https://docs.rs/)")]
#[case(false, "Docs")]
fn test_link_toggle(#[case] include_links: bool, #[case] expected: &str) {
    let options = ConversionOptions {
        include_links,
        ..ConversionOptions::default()
    };
    let md = MarkdownConverter::with_options(options)
        .convert_html(r#"<a href="https://docs.rs/">Docs</a>"#);
    assert_eq!(md, expected);
}

#[rstest]
#[case(true, "![Logo](/logo.png \"Our logo\")")]
#[case(false, "")]
fn test_image_toggle(#[case] include_images: bool, #[case] expected: &str) {
    let options = ConversionOptions {
        include_images,
        ..ConversionOptions::default()
    };
    let md = MarkdownConverter::with_options(options)
        .convert_html(r#"<img src="/logo.png" alt="Logo" title="Our logo">"#);
    assert_eq!(md, expected);
}

#[test]
fn test_code_block() {
    let md = convert("<pre><code class=\"language-rust\">let x = 1;\n</code></pre>");
    assert_eq!(md, "```\nlet x = 1;\n```\n\n");
}

#[test]
fn test_blockquote_paragraphs() {
    let md = convert("<blockquote><p>One</p><p>Two</p></blockquote>");
    assert_eq!(md, "> One\n>\n> Two\n>\n>\n\n");
}

#[test]
fn test_relative_links_resolved() {
    let converter = MarkdownConverter::new()
        .with_base_url("https://example.com/blog/post")
        .unwrap();
    let md = converter.convert_html(r#"<p>See <a href="next">the next post</a>.</p>"#);
    assert_eq!(md, "See [the next post](https://example.com/blog/next).\n\n");
}

#[test]
fn test_scrape_full_page() {
    let html = r#"<!doctype html>
<html>
<head>
  <title>Field Notes</title>
  <meta name="description" content="Notes from the field">
  <meta name="keywords" content="notes, field">
</head>
<body>
  <header><h1>Site header</h1></header>
  <nav><a href="/">Home</a></nav>
  <article>
    <h1>Field Notes</h1>
    <p>These notes cover a long day of observation in the marsh, including birds, insects and weather.</p>
    <div class="social-share">Share this</div>
    <ul><li>Herons</li><li>Dragonflies</li></ul>
    <script>track();</script>
  </article>
  <footer>Copyright</footer>
</body>
</html>"#;

    let document = Document::parse(html, Some("https://notes.example.org/day-1")).unwrap();
    let options = ConversionOptions {
        include_meta: true,
        ..ConversionOptions::default()
    };
    let converter = MarkdownConverter::with_options(options)
        .with_base_url("https://notes.example.org/day-1")
        .unwrap();
    let at = NaiveDate::from_ymd_opt(2025, 1, 2)
        .and_then(|d| d.and_hms_opt(3, 4, 5))
        .unwrap();

    let md = converter.scrape_page(&document, at);

    assert_eq!(
        md,
        "# Field Notes\n\n\
         **URL:** https://notes.example.org/day-1\n\n\
         ## Meta Information\n\n\
         **Description:** Notes from the field\n\n\
         **Keywords:** notes, field\n\n\
         ## Content\n\n\
         # Field Notes\n\n\
         These notes cover a long day of observation in the marsh, including birds, insects and weather.\n\n\
         - Herons\n- Dragonflies\n\n\
         ---\n*Scraped on 2025-01-02 03:04:05*"
    );
    assert!(!md.contains("Share this"));
    assert!(!md.contains("Site header"));
    assert!(!md.contains("\n\n\n"));
}
