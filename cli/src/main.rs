//! wikiutil CLI - wiki page conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use wikiutil::convert::{DirectorySource, IndexConverter};
use wikiutil::render::{DocumentStats, RenderOptions};
use wikiutil::wem::{format_events, EventRecorder};
use wikiutil::{ConvertOptions, Diagnostic, JsonFormat, ParseOptions, WikiParser};

#[derive(Parser)]
#[command(name = "wikiutil")]
#[command(version)]
#[command(
    about = "Convert Google Code wiki pages to HTML, LaTeX, JSON and text",
    long_about = None
)]
struct Cli {
    /// Fail on malformed markup instead of recovering
    #[arg(long, global = true)]
    strict: bool,

    /// Do not turn CamelCase words into page links
    #[arg(long, global = true)]
    no_wiki_words: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a page to HTML
    Html {
        /// Input wiki page
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Omit the <html><body> wrapper
        #[arg(long)]
        fragment: bool,

        /// Suffix appended to internal link targets
        #[arg(long, default_value = "")]
        link_suffix: String,
    },

    /// Convert a page to LaTeX
    #[command(alias = "tex")]
    Latex {
        /// Input wiki page
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Structure level of the page title (0 = part, 1 = chapter, ...)
        #[arg(long, default_value = "0")]
        level: usize,

        /// Page title (defaults to the page summary)
        #[arg(long)]
        title: Option<String>,
    },

    /// Convert a page to JSON
    Json {
        /// Input wiki page
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Convert a page to plain text
    Text {
        /// Input wiki page
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the event stream of a page
    Events {
        /// Input wiki page
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show page information
    Info {
        /// Input wiki page
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert all pages listed by an index page to LaTeX
    Index {
        /// Directory holding the wiki pages
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Name of the index page, without extension
        #[arg(value_name = "INDEX")]
        index: String,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Extension of the wiki page files
        #[arg(long, default_value = "wiki")]
        extension: String,

        /// Convert pages one after another
        #[arg(long)]
        sequential: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let parse_options = ParseOptions::new()
        .with_error_mode(if cli.strict {
            wikiutil::ErrorMode::Strict
        } else {
            wikiutil::ErrorMode::Lenient
        })
        .wiki_words(!cli.no_wiki_words);

    let result = match cli.command {
        Commands::Html {
            input,
            output,
            fragment,
            link_suffix,
        } => cmd_html(
            &input,
            output.as_deref(),
            fragment,
            &link_suffix,
            parse_options,
        ),
        Commands::Latex {
            input,
            output,
            level,
            title,
        } => cmd_latex(&input, output.as_deref(), level, title, parse_options),
        Commands::Json {
            input,
            output,
            compact,
        } => cmd_json(&input, output.as_deref(), compact, parse_options),
        Commands::Text { input, output } => cmd_text(&input, output.as_deref(), parse_options),
        Commands::Events { input } => cmd_events(&input, parse_options),
        Commands::Info { input, json } => cmd_info(&input, json, parse_options),
        Commands::Index {
            root,
            index,
            output,
            extension,
            sequential,
        } => cmd_index(
            &root,
            &index,
            &output,
            &extension,
            parse_options.with_parallel(!sequential),
        ),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn open(input: &Path, options: ParseOptions) -> wikiutil::Result<WikiParser> {
    WikiParser::open_with_options(input, options)
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}: {}", "warning".yellow().bold(), diagnostic);
    }
}

/// Write to a file or stdout. Called only with fully rendered content.
fn emit(output: Option<&Path>, content: &str) -> CmdResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    fragment: bool,
    link_suffix: &str,
    options: ParseOptions,
) -> CmdResult {
    let render_options = RenderOptions::new()
        .with_full_document(!fragment)
        .with_link_suffix(link_suffix);

    let mut renderer = wikiutil::render::HtmlRenderer::new(render_options);
    let diagnostics = open(input, options)?.parse_into(&mut renderer)?;
    print_diagnostics(&diagnostics);

    emit(output, renderer.html())
}

fn cmd_latex(
    input: &Path,
    output: Option<&Path>,
    level: usize,
    title: Option<String>,
    options: ParseOptions,
) -> CmdResult {
    let (doc, diagnostics) = open(input, options)?.parse_with_diagnostics()?;
    print_diagnostics(&diagnostics);

    let output_name = output
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "wiki.tex".to_string());
    let mut render_options = RenderOptions::new()
        .with_structure_level(level)
        .with_output_name(output_name);
    render_options.title = title;

    let latex = wikiutil::render::to_latex(&doc, &render_options);
    for image in &latex.images {
        eprintln!("{} {} -> {}", "image".cyan(), image.url, image.file_name);
    }

    emit(output, &latex.content)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: ParseOptions,
) -> CmdResult {
    let (doc, diagnostics) = open(input, options)?.parse_with_diagnostics()?;
    print_diagnostics(&diagnostics);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = wikiutil::render::to_json(&doc, format)?;
    emit(output, &json)
}

fn cmd_text(input: &Path, output: Option<&Path>, options: ParseOptions) -> CmdResult {
    let (doc, diagnostics) = open(input, options)?.parse_with_diagnostics()?;
    print_diagnostics(&diagnostics);

    emit(output, &wikiutil::render::to_text(&doc))
}

fn cmd_events(input: &Path, options: ParseOptions) -> CmdResult {
    let mut recorder = EventRecorder::new();
    let diagnostics = open(input, options)?.parse_into(&mut recorder)?;
    print_diagnostics(&diagnostics);

    print!("{}", format_events(recorder.events()));
    Ok(())
}

fn cmd_info(input: &Path, json: bool, options: ParseOptions) -> CmdResult {
    let (doc, diagnostics) = open(input, options)?.parse_with_diagnostics()?;

    let stats = DocumentStats::from_document(&doc);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Page Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(summary) = doc.summary() {
        println!("{}: {}", "Summary".bold(), summary);
    }
    if let Some(sidebar) = doc.sidebar() {
        println!("{}: {}", "Sidebar".bold(), sidebar);
    }
    let labels = doc.labels();
    if !labels.is_empty() {
        println!("{}: {}", "Labels".bold(), labels.join(", "));
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Lists".bold(), stats.list_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Links".bold(), stats.link_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!("{}: {}", "Diagnostics".bold(), diagnostics.len());

    if !doc.sections().is_empty() {
        println!();
        println!("{}", "Outline".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for section in doc.sections().iter().filter(|s| s.heading.is_some()) {
            println!("{}{}", "  ".repeat(section.depth - 1), section.title());
        }
    }

    print_diagnostics(&diagnostics);
    Ok(())
}

fn cmd_index(
    root: &Path,
    index: &str,
    output: &Path,
    extension: &str,
    options: ParseOptions,
) -> CmdResult {
    let source = DirectorySource::new(root).with_extension(extension);
    let converter =
        IndexConverter::new(source).with_options(ConvertOptions::new().with_parse_options(options));

    let entries = converter.entries(index)?;
    log::info!("index {} lists {} pages", index, entries.len());

    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Converting pages...");

    let result = converter.convert_entries(entries, |_| pb.inc(1))?;
    pb.finish_with_message("Done!");

    result.write_to(output)?;

    println!("\n{}", "Output files:".green().bold());
    for page in &result.pages {
        println!(
            "  {} {} ({})",
            "├─".dimmed(),
            page.file_name,
            page.entry.page
        );
        for image in &page.latex.images {
            println!("  {}   {} <- {}", "│".dimmed(), image.file_name, image.url);
        }
    }
    println!("  {} content.tex", "└─".dimmed());

    for failure in &result.failures {
        eprintln!(
            "{}: {}: {}",
            "skipped".yellow().bold(),
            failure.entry.page,
            failure.error
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "wikiutil".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Google Code wiki conversion tool");
    println!();
    println!("License: MIT");
}
