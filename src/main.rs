use clap::{Parser, ValueEnum};
use linediff::{
    ClassifiedLine, DiffConfig, DiffEngine, DisplayItem, LineKind, Row, SyntectHighlighter,
    resolve_language_from_path,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const COLUMN_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Output {
    Text,
    Json,
    Html,
}

#[derive(Parser, Debug)]
#[command(name = "linediff")]
#[command(version)]
#[command(about = "Compare two files line by line", long_about = None)]
struct Args {
    /// File to compare from
    original: PathBuf,

    /// File to compare to
    modified: PathBuf,

    /// Show removed and added lines side by side
    #[arg(long)]
    split: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Output::Text)]
    output: Output,

    /// Shorthand for `--output json`
    #[arg(long, conflicts_with_all = ["html", "output"])]
    json: bool,

    /// Shorthand for `--output html`
    #[arg(long, conflicts_with = "output")]
    html: bool,
}

impl Args {
    fn format(&self) -> Output {
        match (self.json, self.html) {
            (true, _) => Output::Json,
            (_, true) => Output::Html,
            _ => self.output,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("linediff: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = DiffConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        DiffConfig::default()
    });

    let original = std::fs::read_to_string(&args.original)?;
    let modified = std::fs::read_to_string(&args.modified)?;

    let output = args.format();
    let mut engine = DiffEngine::new(config);
    if output == Output::Html {
        engine = engine.with_highlighter(SyntectHighlighter::new());
    }
    let result = engine.compute(&original, &modified);
    tracing::info!(
        added = result.stats.added_count,
        removed = result.stats.removed_count,
        "Compared {:?} with {:?}",
        args.original,
        args.modified
    );

    match (output, args.split) {
        (Output::Json, true) => {
            println!("{}", serde_json::to_string_pretty(&engine.side_by_side(&result))?)
        }
        (Output::Json, false) => println!("{}", serde_json::to_string_pretty(&result)?),
        (Output::Html, _) => {
            let language =
                resolve_language_from_path(&args.modified.to_string_lossy(), engine.config());
            print_html(&engine, &result.items, &language);
        }
        (Output::Text, true) => engine.side_by_side(&result).iter().for_each(print_row),
        (Output::Text, false) => result.items.iter().for_each(print_item),
    }

    Ok(())
}

fn number(n: Option<usize>) -> String {
    n.map(|n| n.to_string()).unwrap_or_default()
}

fn marker(kind: LineKind) -> char {
    match kind {
        LineKind::Context => ' ',
        LineKind::Add => '+',
        LineKind::Remove => '-',
    }
}

fn css_class(kind: LineKind) -> &'static str {
    match kind {
        LineKind::Context => "context",
        LineKind::Add => "add",
        LineKind::Remove => "remove",
    }
}

fn print_item(item: &DisplayItem) {
    match item {
        DisplayItem::Fold(fold) => println!("{:>11} ... {} unchanged lines", "", fold.count),
        DisplayItem::Line { line } => println!(
            "{:>5} {:>5} {}{}",
            number(line.old_line_number),
            number(line.new_line_number),
            marker(line.kind),
            line.content
        ),
    }
}

fn cell(line: Option<&ClassifiedLine>, line_number: Option<usize>) -> String {
    let text: String = line
        .map(|l| l.content.chars().take(COLUMN_WIDTH).collect())
        .unwrap_or_default();
    format!(
        "{:>5} {:<width$}",
        number(line_number),
        text,
        width = COLUMN_WIDTH
    )
}

fn print_row(row: &Row) {
    if let Some(fold) = row.fold {
        println!("{:>5} ... {} unchanged lines", "", fold.count);
        return;
    }

    let left = row.left.as_ref();
    let right = row.right.as_ref();
    println!(
        "{} | {}",
        cell(left, left.and_then(|l| l.old_line_number)),
        cell(right, right.and_then(|l| l.new_line_number)),
    );
}

fn print_html(engine: &DiffEngine, items: &[DisplayItem], language: &str) {
    println!("<pre class=\"diff\">");
    for item in items {
        match item {
            DisplayItem::Fold(fold) => println!(
                "<div class=\"fold\" data-fold=\"{}\">{} unchanged lines</div>",
                fold.id, fold.count
            ),
            DisplayItem::Line { line } => println!(
                "<div class=\"{}\">{}{}</div>",
                css_class(line.kind),
                marker(line.kind),
                engine.highlight(&line.content, language)
            ),
        }
    }
    println!("</pre>");
}
