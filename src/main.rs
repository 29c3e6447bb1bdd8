use clap::Parser;
use colored::Colorize;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use waf_ipset_import::aws::AwsCliWaf;
use waf_ipset_import::config::Config;
use waf_ipset_import::output::format_abort;
use waf_ipset_import::{run_import, ImportReport};

/// Create an AWS WAF IP set from a file of IPv4 networks in CIDR notation.
#[derive(Debug, Parser)]
#[command(version)]
struct Opt {
    /// Name of the IP set to create, e.g. Germany
    ipset_name: String,
    /// Text file with one CIDR per line, e.g. de.txt
    cidr_file: PathBuf,
}

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    let opt = Opt::parse();
    dotenv::dotenv().ok();

    match run(&opt) {
        Ok(report) => {
            println!(
                "New IP set {} with {} networks has been created.",
                report.ip_set.name.green(),
                report.networks
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Import failed: {e}");
            eprintln!("{}", format_abort(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}

fn run(opt: &Opt) -> Result<ImportReport, Box<dyn Error>> {
    let config = Config::from_env()?;
    log4rs::init_file(&config.log_config, Default::default())
        .map_err(|e| format!("Error initializing log4rs from {}: {e}", config.log_config))?;
    log::info!("#Start main() ipset_name={}", opt.ipset_name);

    let mut waf = AwsCliWaf::new(&config);
    Ok(run_import(
        &mut waf,
        &opt.ipset_name,
        &opt.cidr_file,
        &config,
    )?)
}
