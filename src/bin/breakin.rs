use std::path::PathBuf;
use structopt::StructOpt;

use breakin::config::Config;
use breakin::input::{fetch, UrlParts};
use breakin::output::{OutputFormat, OutputHandler};
use breakin::scan::{build_engine, scan};

/// Scan an SSH authentication log served over HTTP for break-in attempts
#[derive(StructOpt, Debug)]
#[structopt(name = "breakin", about = "Break-in attempt detector for SSH logs")]
struct Opt {
    /// URL of the log, e.g. http://host/~user/ssh_logs/full_logs.txt
    #[structopt(name = "URL")]
    url: String,

    /// Path to configuration file
    #[structopt(short, long, default_value = "breakin.toml")]
    config: PathBuf,
}

/// Fetch the log once, classify every line, and print the findings
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let opt = Opt::from_args();
    let config = Config::load_or_default(&opt.config)?;

    // Reject a bad URL before touching the network
    let parts = UrlParts::parse(&opt.url)?;
    let mut engine = build_engine(&config)?;
    log::info!("Detection rules initialized");

    let response = fetch(&parts).await?;

    let mut output = OutputHandler::new(
        OutputFormat::from_str(&config.output.format),
        config.output.file_path.clone(),
    )?;
    scan(&response[..], &mut engine, &mut output)?;

    Ok(())
}
