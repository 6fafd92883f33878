use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use anyhow::Result;
use tabula_service::Service;

#[derive(Parser)]
#[command(name = "tabula")]
#[command(about = "In-memory schema-typed table store")]
#[command(version)]
struct Cli {
    #[arg(long, help = "File of newline-delimited JSON requests. Reads stdin if not set.")]
    script: Option<PathBuf>,

    #[arg(long, help = "Pretty-print each response instead of one line per response")]
    pretty: bool,

    #[arg(long, help = "Stop at the first request that does not succeed and exit with an error")]
    stop_on_error: bool,

    #[arg(short, long, help = "Verbose output")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging; stdout carries responses only
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(io::stderr)
        .init();

    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Script file does not exist: {:?}", path);
            }
            tracing::info!("Reading requests from {:?}", path);
            Box::new(BufReader::new(File::open(path)?))
        }
        None => {
            tracing::info!("Reading requests from stdin");
            Box::new(BufReader::new(io::stdin()))
        }
    };

    let service = Service::new();
    let mut stdout = io::stdout().lock();
    let mut handled = 0usize;
    let mut failed = 0usize;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let request = line.trim();
        // Blank lines and '#' comments are skipped
        if request.is_empty() || request.starts_with('#') {
            continue;
        }

        let response = service.handle_json(request);
        handled += 1;

        let text = if cli.pretty {
            serde_json::to_string_pretty(&response)?
        } else {
            serde_json::to_string(&response)?
        };
        writeln!(stdout, "{}", text)?;

        if !response.status.is_success() {
            failed += 1;
            if cli.stop_on_error {
                stdout.flush()?;
                anyhow::bail!(
                    "Request on line {} failed with status {}",
                    index + 1,
                    response.status.code()
                );
            }
        }
    }

    stdout.flush()?;
    tracing::info!("Handled {} request(s), {} failed", handled, failed);

    Ok(())
}
