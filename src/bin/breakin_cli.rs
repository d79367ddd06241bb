use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use structopt::StructOpt;

use breakin::config::Config;
use breakin::input::UrlParts;
use breakin::output::{OutputFormat, OutputHandler};
use breakin::scan::{build_engine, scan};

/// Break-in detector utilities
#[derive(StructOpt, Debug)]
#[structopt(name = "breakin_cli", about = "Break-in detector utilities")]
pub enum Cli {
    /// Generate a default configuration file
    Config {
        /// Output path for the configuration file
        #[structopt(short, long, default_value = "breakin.toml")]
        output: PathBuf,
    },
    /// Scan a saved log file; its leading header block is skipped
    Scan {
        /// Path to log file
        #[structopt(short, long)]
        file: PathBuf,
        /// Path to configuration file
        #[structopt(short, long, default_value = "breakin.toml")]
        config: PathBuf,
    },
    /// Show how a URL is split into host, port and path
    Url {
        /// URL to decompose
        url: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::from_args();

    match cli {
        Cli::Config { output } => {
            let config = Config::default();
            config.to_file(&output)?;
            println!("Default configuration written to: {:?}", output);
        }
        Cli::Scan { file, config } => {
            if !file.exists() {
                eprintln!("File not found: {:?}", file);
                std::process::exit(1);
            }

            let config = Config::load_or_default(&config)?;
            let mut engine = build_engine(&config)?;
            let mut output = OutputHandler::new(
                OutputFormat::from_str(&config.output.format),
                config.output.file_path.clone(),
            )?;
            scan(BufReader::new(File::open(&file)?), &mut engine, &mut output)?;
        }
        Cli::Url { url } => {
            let parts = UrlParts::parse(&url)?;
            println!("Host: {}", parts.host);
            println!("Port: {}", parts.port);
            println!("Path: {}", parts.path);
        }
    }

    Ok(())
}
