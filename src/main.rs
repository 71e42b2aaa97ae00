mod script;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use pad::codec::{self, CodecError};
use pad::export::Download;
use pad::surface::SurfaceError;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("cannot build surface: {0}")]
    Surface(#[from] SurfaceError),
    #[error("invalid signature: {0}")]
    Codec(#[from] CodecError),
}

#[derive(Parser, Debug)]
#[command(name = "signpad", about = "Replay, export and inspect signature pad encodings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed a recorded event script through a headless widget.
    Replay {
        /// Script file (JSON).
        script: PathBuf,
        /// Write the final signature as a PNG file instead of printing its data URL.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Override the script's device pixel ratio.
        #[arg(long, env = "SIGNPAD_DPR")]
        dpr: Option<f64>,
    },
    /// Write a stored encoding to `signature-<date>.png`.
    Export {
        /// File holding the encoded signature.
        encoded: PathBuf,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Date stamp for the file name (defaults to today, UTC).
        #[arg(long)]
        date: Option<String>,
    },
    /// Print the mime type, size and ink coverage of a stored encoding.
    Inspect {
        /// File holding the encoded signature.
        encoded: PathBuf,
    },
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })
}

fn write(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    fs::write(path, bytes).map_err(|source| CliError::Write { path: path.to_path_buf(), source })
}

fn run_replay(script_path: &Path, out: Option<&Path>, dpr: Option<f64>) -> Result<(), CliError> {
    let mut script = script::Script::from_json(&read(script_path)?)?;
    if let Some(dpr) = dpr {
        script.config.device_pixel_ratio = dpr;
    }
    let replay = script::replay(&script)?;
    for (i, change) in replay.changes.iter().enumerate() {
        let label = if change.is_empty() { "cleared".to_string() } else { format!("{} bytes", change.len()) };
        tracing::info!(change = i + 1, %label, "onChange");
    }

    let encoded = replay.core.encoded();
    match out {
        Some(path) if !encoded.is_empty() => {
            write(path, &codec::parse_data_url(encoded)?.bytes)?;
            tracing::info!(path = %path.display(), "signature written");
        }
        Some(_) => tracing::warn!("no signature drawn; nothing written"),
        None => println!("{encoded}"),
    }
    Ok(())
}

fn run_export(encoded_path: &Path, dir: &Path, date: Option<String>) -> Result<(), CliError> {
    let encoded = read(encoded_path)?;
    let encoded = encoded.trim();
    if encoded.is_empty() {
        tracing::warn!("no signature stored; nothing exported");
        return Ok(());
    }
    let date = date.unwrap_or_else(|| time::OffsetDateTime::now_utc().date().to_string());
    let download = Download::new(encoded, &date);
    let path = dir.join(&download.filename);
    write(&path, &download.bytes()?)?;
    println!("{}", path.display());
    Ok(())
}

fn run_inspect(encoded_path: &Path) -> Result<(), CliError> {
    let encoded = read(encoded_path)?;
    let encoded = encoded.trim();
    if encoded.is_empty() {
        println!("no signature");
        return Ok(());
    }
    let url = codec::parse_data_url(encoded)?;
    let image = codec::decode(encoded)?;
    let inked = image.pixels().iter().filter(|p| p.alpha() > 0).count();
    println!("mime:   {}", url.mime);
    println!("bytes:  {}", url.bytes.len());
    println!("size:   {}x{}", image.width(), image.height());
    println!("inked:  {inked} px");
    Ok(())
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay { script, out, dpr } => run_replay(&script, out.as_deref(), dpr),
        Command::Export { encoded, dir, date } => run_export(&encoded, &dir, date),
        Command::Inspect { encoded } => run_inspect(&encoded),
    }
}
