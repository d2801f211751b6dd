use anyhow::{bail, Context};
use clap::Parser;
use simulator::{run_and_write, Config};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Central spin quantum simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML values file; may be given several times, later files override
    /// earlier ones
    #[arg(short = 'f', long = "values", required = true)]
    values: Vec<PathBuf>,

    /// Number of Rayon worker threads (0 = Rayon default)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Log at debug level (same as `verbosity: debug` in the values)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(env_filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    for path in &args.values {
        if !path.exists() {
            bail!("values file {} does not exist", path.display());
        }
    }
    let config = Config::load(&args.values).context("failed to load the values files")?;
    init_tracing(args.verbose || config.is_debug());
    debug!(?config, "loaded config");

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .context("failed to build the rayon thread pool")?;
    }

    let path = run_and_write(&config)?;
    info!(path = %path.display(), "file created");
    Ok(())
}
