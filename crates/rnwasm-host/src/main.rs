use std::path::{Path, PathBuf};

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use rnwasm_host::{HostConfig, HostResult, Runtime};

#[derive(Parser, Debug)]
#[command(name = "rnwasm-host")]
#[command(about = "Run WebAssembly ROS nodes against the rnwasm host interface", long_about = None)]
struct Args {
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Run a module's entry point
    Run {
        /// Module to run (.wasm or .wat)
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Host configuration file
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
        /// Exported function to call
        #[arg(short, long, value_name = "NAME")]
        entry: Option<String>,
        /// Multiplier applied to guest sleeps (0 disables sleeping)
        #[arg(short, long, value_name = "SCALE")]
        time_scale: Option<f64>,
    },

    /// Check that the host provides everything a module imports
    Check {
        /// Module to check (.wasm or .wat)
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Host configuration file
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> HostResult<HostConfig> {
    match path {
        Some(path) => HostConfig::load(path),
        None => Ok(HostConfig::default()),
    }
}

fn main() -> miette::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match args.command {
        Command::Run {
            file,
            config,
            entry,
            time_scale,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(entry) = entry {
                config.entry_point = entry;
            }
            if let Some(time_scale) = time_scale {
                config.time_scale = time_scale;
            }

            let runtime = Runtime::new(config)?;
            let module = runtime.load_file(&file)?;
            runtime.check(&module)?;
            let report = runtime.run(&module)?;
            println!(
                "{} message(s) published in {:?}",
                report.published.len(),
                report.elapsed
            );
            Ok(())
        }
        Command::Check { file, config } => {
            let runtime = Runtime::new(load_config(config.as_deref())?)?;
            let module = runtime.load_file(&file)?;
            runtime.check(&module)?;
            println!("{}: all imports are provided", file.display());
            Ok(())
        }
    }
}
