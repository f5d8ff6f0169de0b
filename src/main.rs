use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_tsp::config::SolverConfig;
use u_tsp::deadline::Deadline;
use u_tsp::engine::TspEngine;
use u_tsp::server::{self, AppState, TspRequest, TspResponse, DEFAULT_CORS_ORIGIN};

#[derive(Parser)]
#[command(name = "u-tsp")]
#[command(about = "Traveling salesperson solver: exact for small inputs, multi-start 2-opt beyond", long_about = None)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, env = "U_TSP_LOG_FORMAT", global = true)]
    log_format: LogFormat,

    /// JSON file with solver settings
    #[arg(long, env = "U_TSP_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Largest instance accepted
    #[arg(long, env = "U_TSP_MAX_CITIES", global = true)]
    max_cities: Option<usize>,

    /// Worker threads for multi-start (defaults to one per core)
    #[arg(long, env = "U_TSP_THREADS", global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Solve a request file and print the response
    Solve {
        /// Request JSON file: {"cities": [...], "distances": [[...]]}
        input: PathBuf,
        /// Wall-time limit in milliseconds
        #[arg(long)]
        time_limit_ms: Option<u64>,
        /// Seed for start-city sampling
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "U_TSP_HOST")]
    host: IpAddr,
    /// Port to listen on
    #[arg(short, long, default_value = "8000", env = "U_TSP_PORT")]
    port: u16,
    /// Per-request wall-time limit in milliseconds
    #[arg(long, env = "U_TSP_TIME_LIMIT_MS")]
    time_limit_ms: Option<u64>,
    /// Default seed for start-city sampling
    #[arg(long, env = "U_TSP_SEED")]
    seed: Option<u64>,
    /// Allowed CORS origin (repeatable)
    #[arg(long = "cors-origin", env = "U_TSP_CORS_ORIGINS", value_delimiter = ',', default_value = DEFAULT_CORS_ORIGIN)]
    cors_origins: Vec<String>,
    /// Allow any origin
    #[arg(long, env = "U_TSP_CORS_PERMISSIVE")]
    cors_permissive: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn load_config(path: Option<&Path>) -> Result<SolverConfig> {
    let Some(path) = path else {
        return Ok(SolverConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let mut config = load_config(cli.config.as_deref())?;
    if cli.max_cities.is_some() {
        config = config.with_max_cities(cli.max_cities);
    }
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("configuring worker threads")?;
    }
    let engine = TspEngine::new(config);

    match cli.command {
        Commands::Serve(args) => {
            let cors = if args.cors_permissive {
                server::cors_layer(&[])
            } else {
                server::cors_layer(&args.cors_origins)
            };
            let config_threshold = engine.config().exact_threshold;
            let state = AppState::new(engine)
                .with_time_limit(args.time_limit_ms.map(Duration::from_millis))
                .with_seed(args.seed);
            info!(
                exact_threshold = config_threshold,
                time_limit_ms = ?args.time_limit_ms,
                "starting server"
            );
            server::serve(SocketAddr::new(args.host, args.port), state, cors)
                .await
                .context("running server")?;
        }
        Commands::Solve {
            input,
            time_limit_ms,
            seed,
        } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let request: TspRequest = serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", input.display()))?;
            let deadline = match time_limit_ms {
                Some(ms) => Deadline::after(Duration::from_millis(ms)),
                None => Deadline::none(),
            };
            let seed = seed.or(request.seed);

            let result = tokio::task::spawn_blocking(move || {
                engine.solve(request.cities, &request.distances, &deadline, seed)
            })
            .await
            .context("solve task failed")??;

            info!(
                algorithm = %result.algorithm,
                optimal = result.is_optimal(),
                elapsed_ms = result.stats.elapsed.as_millis() as u64,
                "solved"
            );
            let response = TspResponse {
                best_path: result.path,
                min_cost: result.total_distance,
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
