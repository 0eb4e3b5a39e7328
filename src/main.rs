//! admission-check - run the static admission checks on a cluster request.
//!
//! Reads a JSON request from the file named by the first argument, or from
//! stdin, and prints `{"allowed":true}` or the error envelope on stdout.
//! Logs go to stderr as JSON lines. Exits non-zero when the request is
//! rejected.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use aro_admission::{AdmissionConfig, OpenShiftCluster, VmSizeCatalog};

/// Run the static admission checks on a cluster request
#[derive(Parser, Debug)]
#[command(name = "admission-check", version, about, long_about = None)]
struct Args {
    /// Request file; stdin when omitted or "-"
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,
}

impl Args {
    /// File to read, `None` for stdin.
    fn input_file(&self) -> Option<&Path> {
        self.input.as_deref().filter(|path| *path != Path::new("-"))
    }
}

/// Input document
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdmissionRequest {
    /// Resource id from the request path
    resource_id: String,
    /// Requested resource
    cluster: OpenShiftCluster,
    /// Stored resource, present for updates
    #[serde(default)]
    current: Option<OpenShiftCluster>,
}

#[derive(Debug, Serialize)]
struct Allowed {
    allowed: bool,
}

fn read_request(input: Option<&Path>) -> Result<AdmissionRequest, Box<dyn std::error::Error>> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&raw)?)
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("aro_admission=info".parse()?)
                .add_directive("admission_check=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AdmissionConfig::from_env().inspect_err(|e| error!("Invalid settings: {}", e))?;
    info!(
        location = %config.location,
        domain = %config.domain,
        api_version = %config.api_version,
        "Loaded admission settings"
    );

    let catalog = Arc::new(VmSizeCatalog::new());
    let validator = config.validator(catalog);
    let request = read_request(args.input_file()).inspect_err(|e| error!("Failed to read request: {}", e))?;

    let result = validator.validate(
        &request.resource_id,
        &request.cluster,
        request.current.as_ref(),
        config.install_architecture_version,
    );

    match result {
        Ok(()) => {
            println!("{}", serde_json::to_string(&Allowed { allowed: true })?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("{}", serde_json::to_string(&e.envelope())?);
            Ok(ExitCode::FAILURE)
        }
    }
}
