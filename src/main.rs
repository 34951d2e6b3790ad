//! sectionkit - expand section and image stubs in static HTML pages

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use sectionkit::{Error, ExpandReport, Expander, Result, decode_page, declare_utf8, dom};

#[derive(Parser)]
#[command(name = "sectionkit")]
#[command(version, about = "Expand section and image stubs in static HTML pages", long_about = None)]
#[command(after_help = "EXAMPLES:
    sectionkit index.html                  Print the expanded page
    sectionkit index.html -o dist/index.html
    sectionkit pages/*.html -o dist/       Expand several pages into a directory
    sectionkit --in-place pages/*.html
    sectionkit --check pages/*.html        Fail if any page still has stubs")]
struct Cli {
    /// HTML files to expand
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (one input) or directory (several inputs)
    #[arg(short, long, value_name = "PATH", conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Rewrite the input files
    #[arg(long)]
    in_place: bool,

    /// Treat inputs as body fragments (partials) rather than full documents
    #[arg(long)]
    fragment: bool,

    /// Only report unexpanded stubs; exit with failure if any are found
    #[arg(long, conflicts_with_all = ["output", "in_place"])]
    check: bool,

    /// Print per-file reports to stderr as JSON lines
    #[arg(long)]
    json: bool,

    /// Suppress per-file summaries
    #[arg(short, long)]
    quiet: bool,
}

/// Where an expanded page goes.
enum Destination {
    Stdout,
    File(PathBuf),
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: &'a Path,
    #[serde(flatten)]
    report: ExpandReport,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    file: &'a Path,
    pending: usize,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = if cli.check { check(&cli) } else { expand_all(&cli) };
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load(path: &Path, fragment: bool) -> Result<dom::Document> {
    let bytes = fs::read(path)?;
    let html = decode_page(&bytes);
    let mut doc = if fragment {
        dom::parse_fragment(&html)
    } else {
        dom::parse_document(&html)
    };
    // Output is always UTF-8.
    declare_utf8(&mut doc)?;
    Ok(doc)
}

fn render(doc: &dom::Document, fragment: bool) -> Result<String> {
    match doc.body() {
        Some(body) if fragment => doc.inner_html(body),
        _ => doc.to_html(),
    }
}

fn destinations(cli: &Cli) -> Result<Vec<Destination>> {
    if cli.in_place {
        return Ok(cli.inputs.iter().cloned().map(Destination::File).collect());
    }

    match (&cli.output, cli.inputs.as_slice()) {
        (None, [_]) => Ok(vec![Destination::Stdout]),
        (None, _) => Err(Error::InvalidArguments(
            "several inputs need --output <DIR> or --in-place".to_string(),
        )),
        (Some(out), [_]) if !names_directory(out) => Ok(vec![Destination::File(out.clone())]),
        (Some(dir), inputs) => {
            let mut seen = HashSet::new();
            let paths = inputs
                .iter()
                .map(|input| {
                    let name = input.file_name().ok_or_else(|| {
                        Error::InvalidArguments(format!("{} has no file name", input.display()))
                    })?;
                    let path = dir.join(name);
                    if !seen.insert(path.clone()) {
                        return Err(Error::InvalidArguments(format!(
                            "{} would overwrite another input's output at {}",
                            input.display(),
                            path.display()
                        )));
                    }
                    Ok(Destination::File(path))
                })
                .collect::<Result<Vec<_>>>()?;
            fs::create_dir_all(dir)?;
            Ok(paths)
        }
    }
}

/// An existing directory, or a path spelled with a trailing separator.
fn names_directory(path: &Path) -> bool {
    path.is_dir() || path.to_string_lossy().ends_with(std::path::is_separator)
}

fn expand_all(cli: &Cli) -> Result<bool> {
    let expander = Expander::new()?;
    let destinations = destinations(cli)?;
    let mut total = ExpandReport::default();

    for (input, destination) in cli.inputs.iter().zip(destinations) {
        let mut doc = load(input, cli.fragment)?;
        let report = expander.run(&mut doc);
        let html = render(&doc, cli.fragment)?;

        match destination {
            Destination::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.flush()?;
            }
            Destination::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, html)?;
            }
        }

        summarize(cli, &FileReport { file: input, report });
        total += report;
    }

    tracing::info!(
        files = cli.inputs.len(),
        sections = total.sections,
        inline_images = total.inline_images,
        "done"
    );
    Ok(true)
}

fn check(cli: &Cli) -> Result<bool> {
    let expander = Expander::new()?;
    let mut clean = true;

    for input in &cli.inputs {
        let doc = load(input, cli.fragment)?;
        let pending = expander.pending(&doc, doc.root());
        if pending > 0 {
            clean = false;
        }

        if cli.json {
            print_json(&CheckReport { file: input, pending });
        } else if pending > 0 || !cli.quiet {
            eprintln!("{}: {pending} unexpanded stub(s)", input.display());
        }
    }

    Ok(clean)
}

fn summarize(cli: &Cli, file_report: &FileReport<'_>) {
    if cli.json {
        print_json(file_report);
        return;
    }
    if cli.quiet {
        return;
    }

    let r = &file_report.report;
    eprintln!(
        "{}: {} section(s), {} image stub(s), {} lightbox image(s) normalized{}",
        file_report.file.display(),
        r.sections,
        r.inline_images,
        r.normalized_images,
        if r.skipped > 0 {
            format!(", {} unknown section type(s) left as is", r.skipped)
        } else {
            String::new()
        }
    );
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => eprintln!("{line}"),
        Err(e) => tracing::warn!(error = %e, "could not encode report"),
    }
}
