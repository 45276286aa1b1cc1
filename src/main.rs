use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use rastermeta::config::{DEFAULT_NTP_PORT, DEFAULT_NTP_SERVER, DEFAULT_OUTPUT_NAME};
use rastermeta::{run, ExtractorConfig, MetaError};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Extract raster metadata (bbox, SRS, size, pixel geometry, nodata, bands, datatype)
/// into `<input>/metadata.json`
#[derive(Parser, Debug)]
#[command(name = "rastermeta", version)]
struct Cli {
    /// Input raster; absolute, or relative to the current directory. A sibling .vrt takes precedence
    #[arg(short = 'P', long)]
    payload: PathBuf,

    /// Zoom level for the tiling stage (not used by metadata extraction)
    #[arg(short = 'z', long, default_value_t = 19)]
    zoom: u32,

    /// Time server used for the extraction timestamp
    #[arg(long, default_value = DEFAULT_NTP_SERVER)]
    ntp_server: String,

    /// Time server port
    #[arg(long, default_value_t = DEFAULT_NTP_PORT)]
    ntp_port: u16,

    /// Time server timeout in seconds
    #[arg(long, default_value_t = 5.0)]
    ntp_timeout: f64,

    /// Do not contact the time server, use the local clock
    #[arg(long)]
    offline: bool,

    /// File name of the sidecar inside the output directory
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_NAME)]
    output_name: String,
}

impl Cli {
    fn config(&self) -> Result<ExtractorConfig> {
        let ntp_timeout = Duration::try_from_secs_f64(self.ntp_timeout)
            .with_context(|| format!("invalid time server timeout: {}", self.ntp_timeout))?;

        Ok(ExtractorConfig {
            ntp_server: self.ntp_server.clone(),
            ntp_port: self.ntp_port,
            ntp_timeout,
            offline: self.offline,
            output_name: self.output_name.clone(),
            ..Default::default()
        })
    }
}

fn execute(cli: &Cli) -> Result<PathBuf> {
    let config = cli.config()?;
    debug!("Configuration: {:?}", config);

    run(&cli.payload, &config)
        .with_context(|| format!("failed to extract metadata for {}", cli.payload.display()))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let cli = Cli::parse();
    debug!("Parsed CLI args: {:?}", cli);
    debug!("Zoom level {} is reserved for tiling", cli.zoom);

    match execute(&cli) {
        Ok(output) => {
            info!("Done: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            // logging may be filtered out, stderr always gets the reason
            if let Some(MetaError::InputMissing) = e.downcast_ref::<MetaError>() {
                eprintln!("{}", MetaError::InputMissing);
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}
