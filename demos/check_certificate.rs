//! Checks a certificate file against an instance file.
//!
//! Usage: `cargo run --example check_certificate <instance.json> <certificate.json>`

use batchsched::checker::check_file;
use batchsched::problem::Instance;
use std::error::Error;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode, Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [instance_path, certificate_path] = args.as_slice() else {
        eprintln!("usage: check_certificate <instance.json> <certificate.json>");
        return Ok(ExitCode::FAILURE);
    };

    let instance = Instance::load(instance_path)?;
    let report = check_file(&instance, certificate_path)?;
    println!("{report}");

    Ok(if report.is_feasible {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
