use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use mergeviz::ui::install_panic_hook;
use mergeviz::{run_trace, util, App, Config};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Terminal merge sort visualizer
#[derive(Parser)]
#[command(name = "mergeviz")]
#[command(about = "Watch merge sort compare, write, and settle an array")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Number of elements (8-150 in the visualizer)
    #[arg(long, global = true)]
    size: Option<usize>,

    /// Playback speed multiplier (0.25-3.0)
    #[arg(long)]
    speed: Option<f64>,

    /// Seed for reproducible arrays
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Start sorting immediately
    #[arg(long)]
    autoplay: bool,

    /// Data directory for config and logs (default: ~/.mergeviz)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the sorter headless and print its events as JSON lines
    Trace(TraceArgs),
}

#[derive(Args)]
struct TraceArgs {
    /// Comma-separated input values; overrides --size
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    values: Option<Vec<i64>>,

    /// Print only the final summary
    #[arg(long)]
    summary: bool,
}

fn init_logging() -> Result<()> {
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    util::init_data_dir(cli.data_dir.clone());
    init_logging()?;

    let mut config = Config::load().with_seed(cli.seed);

    match cli.command {
        Some(Commands::Trace(args)) => {
            let values = match args.values {
                Some(values) => values,
                None => {
                    let size = cli.size.unwrap_or(config.array.size);
                    let mut rng = match cli.seed {
                        Some(seed) => StdRng::seed_from_u64(seed),
                        None => StdRng::from_os_rng(),
                    };
                    util::random_array_with(&mut rng, size, config.array.min, config.array.max)
                }
            };
            let mut stdout = io::stdout().lock();
            run_trace(&values, args.summary, &mut stdout)?;
            Ok(())
        }
        None => {
            if let Some(size) = cli.size {
                config = config.with_size(size);
            }
            if let Some(speed) = cli.speed {
                config = config.with_speed(speed);
            }
            if cli.autoplay {
                config = config.with_autoplay(true);
            }

            install_panic_hook();
            App::launch(config).await
        }
    }
}
