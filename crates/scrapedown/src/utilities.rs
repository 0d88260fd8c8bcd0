//! Helpers around the converter: output cleanup, file naming, front matter.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static FILENAME_UNSAFE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\-_\s]").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Longest filename stem produced by [`sanitize_filename`]
pub const MAX_FILENAME_CHARS: usize = 100;

/// Replace every run of three or more newlines with exactly two
pub fn collapse_newlines(markdown: &str) -> String {
    EXCESS_NEWLINES.replace_all(markdown, "\n\n").into_owned()
}

/// Collapse newlines, trim, and expand tabs to four spaces
pub fn clean_markdown(markdown: &str) -> String {
    collapse_newlines(markdown).trim().replace('\t', "    ")
}

/// Make a string safe to use as a file name stem.
///
/// Drops everything but ASCII letters, digits, `-`, `_` and whitespace,
/// turns whitespace runs into `-`, lowercases and caps the length.
pub fn sanitize_filename(name: &str) -> String {
    dashed_lowercase(name).chars().take(MAX_FILENAME_CHARS).collect()
}

fn dashed_lowercase(name: &str) -> String {
    let kept = FILENAME_UNSAFE.replace_all(name, "");
    WHITESPACE_RUN.replace_all(&kept, "-").to_lowercase()
}

/// Host of `url` without a leading `www.`, or `unknown-site`
pub fn extract_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.replacen("www.", "", 1)))
        .unwrap_or_else(|| "unknown-site".to_string())
}

/// `{date}-{domain}-{title}`, e.g. `2024-05-06-example.com-my-page`
pub fn generate_filename(title: Option<&str>, url: &str, date: NaiveDate) -> String {
    let title = sanitize_filename(title.filter(|t| !t.is_empty()).unwrap_or("untitled"));
    format!("{}-{}-{}", date.format("%Y-%m-%d"), extract_domain(url), title)
}

/// Default download name when no URL is known: the title (`webpage` when
/// missing) with the same character rules as [`sanitize_filename`] but no
/// length cap, or `page-content` when nothing survives
pub fn default_filename(title: Option<&str>) -> String {
    let name = dashed_lowercase(title.filter(|t| !t.is_empty()).unwrap_or("webpage"));
    if name.is_empty() {
        "page-content".to_string()
    } else {
        name
    }
}

/// Values written into the YAML front matter block
#[derive(Debug, Clone, Default)]
pub struct FrontMatter<'a> {
    pub title: Option<&'a str>,
    pub url: Option<&'a str>,
    pub description: Option<&'a str>,
}

/// Prepend a YAML front matter block
pub fn add_frontmatter(
    markdown: &str,
    meta: &FrontMatter<'_>,
    scraped_at: DateTime<Utc>,
) -> String {
    let url = meta.url.unwrap_or("");
    format!(
        "---\ntitle: \"{}\"\nurl: \"{}\"\ndomain: \"{}\"\n\
         scraped_date: \"{}\"\ndescription: \"{}\"\n---\n\n{}",
        meta.title.unwrap_or("Untitled"),
        url,
        extract_domain(url),
        scraped_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        meta.description.unwrap_or(""),
        markdown
    )
}

/// Human readable size: `0 Bytes`, `512 Bytes`, `1.5 KB`, `2 MB`
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let rounded = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", rounded, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_collapse_newlines() {
        assert_eq!(collapse_newlines("a\n\n\n\nb\n\nc\n\n\n"), "a\n\nb\n\nc\n\n");
        assert_eq!(clean_markdown("\n\n\ta\n\n\n"), "a");
        assert_eq!(clean_markdown("x\n\tcode"), "x\n    code");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Hello, World! (2024)"), "hello-world-2024");
        assert_eq!(sanitize_filename("  a   b_c-d "), "-a-b_c-d-");
        assert_eq!(sanitize_filename(&"x".repeat(150)).len(), MAX_FILENAME_CHARS);
    }

    #[test]
    fn test_extract_domain() {
        assert_eq!(extract_domain("https://www.example.com/a?b"), "example.com");
        assert_eq!(extract_domain("http://docs.rs"), "docs.rs");
        assert_eq!(extract_domain("not a url"), "unknown-site");
    }

    #[test]
    fn test_filenames() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        assert_eq!(
            generate_filename(Some("My Page!"), "https://www.example.com/x", date),
            "2024-05-06-example.com-my-page"
        );
        assert_eq!(generate_filename(None, "", date), "2024-05-06-unknown-site-untitled");

        assert_eq!(default_filename(Some("Rust: Intro")), "rust-intro");
        assert_eq!(default_filename(Some("???")), "page-content");
        assert_eq!(default_filename(None), "webpage");
        assert_eq!(default_filename(Some("")), "webpage");
        assert_eq!(default_filename(Some(&"y".repeat(150))).len(), 150);
    }

    #[test]
    fn test_frontmatter() {
        let at = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let meta = FrontMatter {
            title: Some("Page"),
            url: Some("https://www.example.com/p"),
            description: None,
        };

        let out = add_frontmatter("# Body", &meta, at);
        assert_eq!(
            out,
            "---\ntitle: \"Page\"\nurl: \"https://www.example.com/p\"\ndomain: \"example.com\"\n\
             scraped_date: \"2024-05-06T07:08:09.000Z\"\ndescription: \"\"\n---\n\n# Body"
        );
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
    }
}
