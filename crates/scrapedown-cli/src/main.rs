use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, Utc};
use clap::Parser;
use miette::{IntoDiagnostic, Result, WrapErr};
use scrapedown::utilities::{
    add_frontmatter, default_filename, format_file_size, generate_filename, FrontMatter,
};
use scrapedown::{ConversionOptions, Document, MarkdownConverter, PageLayout, Selector};
use tracing_subscriber::EnvFilter;

mod settings;

/// Scrape an HTML page to Markdown.
///
/// Picks the main content of the page, drops navigation, ads and other
/// boilerplate, and prints the Markdown or saves it as `<filename>.md`.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct CliArgs {
    /// HTML file to convert. Reads stdin when omitted or `-`.
    input: Option<PathBuf>,
    /// Address the page was loaded from. Used for the URL line, the
    /// generated filename and resolving relative links.
    #[clap(short, long)]
    url: Option<String>,
    /// Directory to save `<filename>.md` into. Prints to stdout when omitted.
    #[clap(short, long)]
    output: Option<PathBuf>,
    /// Filename (without `.md`). Generated from date, domain and title by default.
    #[clap(short, long)]
    filename: Option<String>,
    /// Leave out the `# <title>` line
    #[clap(long)]
    no_title: bool,
    /// Leave out the `**URL:**` line
    #[clap(long)]
    no_url: bool,
    /// Drop images instead of emitting `![alt](src)`
    #[clap(long)]
    no_images: bool,
    /// Emit link text only
    #[clap(long)]
    no_links: bool,
    /// Add a "Meta Information" section from description, keywords and author
    #[clap(long)]
    meta: bool,
    /// Prepend a YAML front matter block
    #[clap(long)]
    frontmatter: bool,
    /// Report filename and size on stderr
    #[clap(long)]
    preview: bool,
    /// Extra boilerplate selector to strip (`tag`, `.class`, `#id` or `[attr="value"]`)
    #[clap(long = "strip", value_name = "SELECTOR")]
    strip: Vec<String>,
    /// Settings file. Defaults to `<config dir>/scrapedown/settings.json`.
    #[clap(long)]
    settings: Option<PathBuf>,
    /// Save the resulting toggles as the new defaults
    #[clap(long)]
    save_settings: bool,
}

impl CliArgs {
    /// Layer command line flags over saved settings
    fn apply(&self, options: &mut ConversionOptions) {
        if self.no_title {
            options.include_title = false;
        }
        if self.no_url {
            options.include_url = false;
        }
        if self.no_images {
            options.include_images = false;
        }
        if self.no_links {
            options.include_links = false;
        }
        if self.meta {
            options.include_meta = true;
        }
        if let Some(filename) = &self.filename {
            options.filename = Some(filename.clone());
        }
    }

    fn layout(&self) -> Result<PageLayout> {
        let mut layout = PageLayout::default();
        for raw in &self.strip {
            let selector: Selector = raw
                .parse()
                .into_diagnostic()
                .wrap_err_with(|| format!("invalid --strip selector {raw:?}"))?;
            layout.boilerplate_selectors.push(selector);
        }
        Ok(layout)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let args = CliArgs::parse();
    run(&args)
}

fn run(args: &CliArgs) -> Result<()> {
    let settings_path = args.settings.clone().or_else(settings::default_path);
    let mut options = match &settings_path {
        Some(path) => settings::load(path)?,
        None => ConversionOptions::default(),
    };
    args.apply(&mut options);

    if args.save_settings {
        match &settings_path {
            Some(path) => {
                settings::save(path, &options)?;
                tracing::info!(path = %path.display(), "settings saved");
            }
            None => tracing::warn!("no config directory found, settings not saved"),
        }
    }

    let document = read_document(args.input.as_deref(), args.url.as_deref())?;
    let mut converter = MarkdownConverter::with_options(options.clone());
    if let Some(url) = &args.url {
        converter = converter.with_base_url(url).into_diagnostic()?;
    }

    let now = Local::now();
    let mut markdown = converter.scrape_page_with(&document, &args.layout()?, now.naive_local());
    if args.frontmatter {
        let meta = FrontMatter {
            title: document.title.as_deref(),
            url: document.url.as_deref(),
            description: document.meta.description.as_deref(),
        };
        markdown = add_frontmatter(&markdown, &meta, now.with_timezone(&Utc));
    }

    let filename = output_filename(&options, &document, now.date_naive());
    if args.preview {
        eprintln!("Filename: {filename}.md");
        eprintln!("Generated: {}", now.format("%Y-%m-%d %H:%M:%S"));
        eprintln!("Size: {}", format_file_size(markdown.len() as u64));
    }

    match &args.output {
        Some(dir) => {
            let path = write_markdown(dir, &filename, &markdown)?;
            tracing::info!(path = %path.display(), "markdown saved");
        }
        None => println!("{markdown}"),
    }
    Ok(())
}

fn read_document(input: Option<&Path>, url: Option<&str>) -> Result<Document> {
    let document = match input {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("failed to open {}", path.display()))?;
            Document::read_from(file, url)
        }
        _ => Document::read_from(io::stdin().lock(), url),
    };
    document.into_diagnostic().wrap_err("failed to load the page")
}

/// Explicit filename, else date-domain-title when the URL is known, else the
/// sanitized title
fn output_filename(options: &ConversionOptions, document: &Document, date: NaiveDate) -> String {
    if let Some(name) = options.filename.as_deref().filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    match &document.url {
        Some(url) => generate_filename(document.title.as_deref(), url, date),
        None => default_filename(document.title.as_deref()),
    }
}

fn write_markdown(dir: &Path, filename: &str, markdown: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(format!("{filename}.md"));
    fs::write(&path, markdown)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
