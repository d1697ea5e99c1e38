use clap::{ArgAction, Parser, Subcommand};
use folio::{Editor, EditorConfig, FolioError, PdfDocument};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Extract, replace, merge and insert PDF pages.
///
/// Page numbers are zero-based.
#[derive(Parser)]
#[command(name = "folio", version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, env = "FOLIO_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Store output streams uncompressed
    #[arg(long, global = true)]
    no_compress: bool,

    /// Increase log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the page count and version of PDF files
    Info {
        #[arg(required = true)]
        files: Vec<String>,

        /// Print one JSON object per file
        #[arg(long)]
        json: bool,
    },

    /// Write a single page to a new document
    Extract {
        input: String,
        #[arg(allow_negative_numbers = true)]
        page: i64,
        /// Output file, `-` for stdout
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Replace one page with a page of another document
    Replace {
        input: String,
        #[arg(allow_negative_numbers = true)]
        page: i64,
        replacement: String,
        #[arg(allow_negative_numbers = true)]
        replacement_page: i64,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Replace several pages at once: --pages 1,3 --with 0,0
    ReplaceMany {
        input: String,
        replacement: String,
        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        pages: Vec<i64>,
        #[arg(long = "with", value_delimiter = ',', required = true, allow_negative_numbers = true)]
        replacement_pages: Vec<i64>,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Concatenate documents; missing inputs are skipped
    Merge {
        #[arg(required = true)]
        inputs: Vec<String>,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Insert a document after a page of another (default: at the end)
    Insert {
        target: String,
        to_insert: String,
        #[arg(long, allow_negative_numbers = true)]
        after: Option<i64>,
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Serialize)]
struct DocumentInfo<'a> {
    file: &'a str,
    pages: usize,
    version: &'a str,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(cli: Cli) -> Result<(), FolioError> {
    let mut config = EditorConfig::load(cli.config.as_deref())?;
    if cli.no_compress {
        config.compress = false;
    }
    let editor = Editor::from_config(config);

    match cli.command {
        Commands::Info { files, json } => {
            for file in &files {
                let doc = editor.load(file)?;
                if json {
                    let info = DocumentInfo {
                        file,
                        pages: doc.page_count(),
                        version: doc.version(),
                    };
                    println!("{}", serde_json::to_string(&info)?);
                } else {
                    println!("{}: {} pages (PDF {})", file, doc.page_count(), doc.version());
                }
            }
            Ok(())
        }
        Commands::Extract { input, page, output } => {
            let doc = editor.extract_page(&input, page)?;
            write_output(doc, &output)
        }
        Commands::Replace {
            input,
            page,
            replacement,
            replacement_page,
            output,
        } => {
            let doc = editor.replace_page(&input, page, &replacement, replacement_page)?;
            write_output(doc, &output)
        }
        Commands::ReplaceMany {
            input,
            replacement,
            pages,
            replacement_pages,
            output,
        } => {
            let doc = editor.replace_pages(&input, &pages, &replacement, &replacement_pages)?;
            write_output(doc, &output)
        }
        Commands::Merge { inputs, output } => {
            let outcome = editor.merge_report(&inputs)?;
            for name in &outcome.skipped {
                eprintln!("Skipped missing input: {}", name);
            }
            write_output(outcome.document, &output)
        }
        Commands::Insert {
            target,
            to_insert,
            after,
            output,
        } => {
            let doc = editor.insert_document(&target, &to_insert, after)?;
            write_output(doc, &output)
        }
    }
}

/// Writes `doc` to `output`, or to stdout when `output` is `-`.
fn write_output(mut doc: PdfDocument, output: &Path) -> Result<(), FolioError> {
    if output == Path::new("-") {
        let bytes = doc.to_bytes()?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(&bytes)?;
        stdout.flush()?;
    } else {
        doc.save(output)?;
        log::info!("Wrote {} pages to {}", doc.page_count(), output.display());
    }
    Ok(())
}
