use std::path::PathBuf;
use std::process;

use clap::Parser;
use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use fence::{Document, Scanner};
use inliner::{Inliner, SyncError, UpdatedDocument};

#[derive(Parser)]
#[command(
    name = "readme-sync",
    version,
    about = "Inline source files into the annotated code blocks of a README"
)]
struct Cli {
    /// Documentation file to update
    #[arg(default_value = "README.md")]
    file: PathBuf,

    /// Report out-of-date blocks without writing (exit 1 if any)
    #[arg(long, conflicts_with = "list")]
    check: bool,

    /// List annotated blocks and exit
    #[arg(long)]
    list: bool,

    /// Suppress the per-block "inlined" lines
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored error output
    #[arg(long)]
    no_color: bool,
}

struct Reporter {
    writer: StandardStream,
    config: term::Config,
    files: SimpleFiles<String, String>,
}

impl Reporter {
    fn new(no_color: bool) -> Self {
        let color_choice = if no_color {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        };
        Reporter {
            writer: StandardStream::stderr(color_choice),
            config: term::Config::default(),
            files: SimpleFiles::new(),
        }
    }

    fn emit(&self, diagnostic: &Diagnostic<usize>) {
        let _ = term::emit_to_write_style(
            &mut self.writer.lock(),
            &self.config,
            &self.files,
            diagnostic,
        );
    }

    fn emit_error(&self, error: &SyncError) {
        match error.span() {
            Some((file_id, span)) => {
                let diagnostic = Diagnostic::new(Severity::Error)
                    .with_message(error.to_string())
                    .with_labels(vec![
                        Label::primary(file_id, span).with_message("referenced here"),
                    ]);
                self.emit(&diagnostic);
            }
            None => eprintln!("error: {}", error),
        }
    }

    fn emit_stale(&self, document: &Document, updated: &UpdatedDocument) -> usize {
        let mut stale = 0;
        for block in updated.stale_blocks() {
            let diagnostic = Diagnostic::new(Severity::Warning)
                .with_message(format!("block is out of date with '{}'", block.source))
                .with_labels(vec![Label::primary(document.source_id, block.span.clone())]);
            self.emit(&diagnostic);
            stale += 1;
        }
        stale
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    let mut reporter = Reporter::new(cli.no_color);

    // Read document
    let text = match inliner::read_document(&cli.file) {
        Ok(text) => text,
        Err(e) => {
            reporter.emit_error(&e);
            return 1;
        }
    };

    // Register with codespan and scan
    let name = cli.file.display().to_string();
    let file_id = reporter.files.add(name.clone(), text.clone());
    let document = Scanner::new().scan(text, file_id);

    // --list: print blocks without reading sources
    if cli.list {
        for block in &document.blocks {
            println!(
                "{}:{}  {}  {}",
                name,
                document.line_of(block.span.start),
                block.language,
                block.source
            );
        }
        return 0;
    }

    // Inline
    let inliner = Inliner::new();
    let result = if cli.quiet || cli.check {
        inliner.inline_document(&document, &mut std::io::sink())
    } else {
        inliner.inline_document(&document, &mut std::io::stdout())
    };
    let updated = match result {
        Ok(updated) => updated,
        Err(e) => {
            reporter.emit_error(&e);
            return 1;
        }
    };

    // --check: report stale blocks, never write
    if cli.check {
        let stale = reporter.emit_stale(&document, &updated);
        if stale > 0 {
            eprintln!("{} out-of-date block(s) in {}", stale, name);
            return 1;
        }
        eprintln!("ok: {} is up to date", name);
        return 0;
    }

    // Write back
    if let Err(e) = updated.write_to(&cli.file) {
        reporter.emit_error(&e);
        return 1;
    }
    log::info!(
        "{}: {} block(s), {} changed",
        name,
        updated.blocks.len(),
        updated.stale_blocks().count()
    );
    0
}
