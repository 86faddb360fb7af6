use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use mdhtml::{Config, Error, Preview};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mdhtml")]
#[command(about = "Render Markdown to a safe HTML fragment")]
struct Cli {
    /// Input Markdown file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Output HTML file (writes stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit the two-panel preview (raw source and rendered HTML)
    #[arg(long)]
    page: bool,

    /// Also write the Markdown source, unmodified, to this path
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> mdhtml::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::compiled_default().clone(),
    };

    let markdown = read_input(cli.input.as_deref())?;
    tracing::debug!(bytes = markdown.len(), "read markdown");

    let mut preview = Preview::new(config);
    preview.set_markdown(&markdown);

    let html = if cli.page {
        preview.to_page()
    } else {
        preview.html().to_string()
    };

    match &cli.output {
        Some(path) => {
            write_file(path, html.as_bytes())?;
            tracing::info!("wrote {}", path.display());
        }
        None => {
            writeln!(io::stdout().lock(), "{html}").map_err(|source| Error::Io {
                path: PathBuf::from("<stdout>"),
                source,
            })?;
        }
    }

    if let Some(path) = &cli.export {
        write_file(path, preview.markdown().as_bytes())?;
        tracing::info!("exported markdown to {}", path.display());
    }

    Ok(())
}

fn read_input(input: Option<&Path>) -> mdhtml::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut markdown = String::new();
            io::stdin()
                .read_to_string(&mut markdown)
                .map_err(|source| Error::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Ok(markdown)
        }
    }
}

fn write_file(path: &Path, contents: &[u8]) -> mdhtml::Result<()> {
    fs::write(path, contents).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
