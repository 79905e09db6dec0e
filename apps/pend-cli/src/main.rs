use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

use pend_app::{history_to_csv, AppConfig, AppError, AppResult, TuningSession};
use pend_control::PidGains;
use pend_sim::{
    run_sim, DirectResponse, ResponseModel, Sample, SetpointProgram, SimOptions, Simulator,
    TorquePendulum,
};
use pend_stream::{FeedOptions, FeedServer, RemoteFeed};
use tracing::debug;

#[derive(Parser)]
#[command(name = "pend-cli")]
#[command(about = "Pendulab CLI - PID pendulum tuning tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the local simulation loop
    Run {
        /// Optional YAML config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Proportional gain (overrides config)
        #[arg(long)]
        kp: Option<f64>,
        /// Integral gain (overrides config)
        #[arg(long)]
        ki: Option<f64>,
        /// Derivative gain (overrides config)
        #[arg(long)]
        kd: Option<f64>,
        /// Time step in seconds (overrides config)
        #[arg(long)]
        dt: Option<f64>,
        /// End time in seconds
        #[arg(long, default_value_t = 10.0)]
        t_end: f64,
        /// Setpoint (overrides config)
        #[arg(long)]
        setpoint: Option<f64>,
        /// Simulate the damped pendulum instead of the direct-response plant
        #[arg(long)]
        pendulum: bool,
        /// Output CSV file path (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Consume samples from a running feed
    Stream {
        /// Optional YAML config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Feed host (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Feed port (overrides config)
        #[arg(long)]
        port: Option<u16>,
        /// Stop after this many samples
        #[arg(long, default_value_t = 100)]
        max_samples: usize,
        /// Output CSV file path (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Serve the synthetic sample feed
    Feed {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = 5000)]
        port: u16,
        /// Interval between samples in milliseconds
        #[arg(long, default_value_t = 100)]
        period_ms: u64,
        /// Setpoint carried on every sample
        #[arg(long, default_value_t = 50.0)]
        setpoint: f64,
        /// Close each client after this many samples
        #[arg(long)]
        max_samples: Option<u64>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            kp,
            ki,
            kd,
            dt,
            t_end,
            setpoint,
            pendulum,
            output,
        } => cmd_run(
            config.as_deref(),
            kp,
            ki,
            kd,
            dt,
            t_end,
            setpoint,
            pendulum,
            output.as_deref(),
        ),
        Commands::Stream {
            config,
            host,
            port,
            max_samples,
            output,
        } => cmd_stream(config.as_deref(), host, port, max_samples, output.as_deref()),
        Commands::Feed {
            bind,
            port,
            period_ms,
            setpoint,
            max_samples,
        } => cmd_feed(&bind, port, period_ms, setpoint, max_samples),
    }
}

fn load_config(path: Option<&Path>) -> AppResult<AppConfig> {
    match path {
        Some(p) => {
            debug!(path = %p.display(), "loading config");
            AppConfig::load(p)
        }
        None => Ok(AppConfig::default()),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    config: Option<&Path>,
    kp: Option<f64>,
    ki: Option<f64>,
    kd: Option<f64>,
    dt: Option<f64>,
    t_end: f64,
    setpoint: Option<f64>,
    pendulum: bool,
    output: Option<&Path>,
) -> AppResult<()> {
    let cfg = load_config(config)?;
    let gains = PidGains::new(
        kp.unwrap_or(cfg.gains.kp),
        ki.unwrap_or(cfg.gains.ki),
        kd.unwrap_or(cfg.gains.kd),
    )?;
    let dt = dt.unwrap_or_else(|| cfg.dt());
    let setpoint = setpoint.unwrap_or_else(|| cfg.setpoint());
    let program = SetpointProgram::constant(setpoint);

    println!(
        "Running simulation: kp={} ki={} kd={}  dt={:.3}s  t_end={:.3}s  setpoint={}",
        gains.kp, gains.ki, gains.kd, dt, t_end, setpoint
    );

    let opts = SimOptions {
        dt,
        t_end,
        ..SimOptions::default()
    };

    if pendulum {
        let plant = TorquePendulum::new(1.0, 0.5, 0.0)?;
        let mut sim = Simulator::new(gains, plant, program);
        run_and_report(&mut sim, &opts, output)
    } else {
        let plant = DirectResponse::new(0.0);
        let mut sim = Simulator::new(gains, plant, program);
        run_and_report(&mut sim, &opts, output)
    }
}

fn run_and_report<M: ResponseModel>(
    sim: &mut Simulator<M>,
    opts: &SimOptions,
    output: Option<&Path>,
) -> AppResult<()> {
    let record = run_sim(sim, opts)?;

    println!("✓ Simulation completed");
    print_summary(&record.samples);
    write_history(&record.samples, output)
}

fn cmd_stream(
    config: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
    max_samples: usize,
    output: Option<&Path>,
) -> AppResult<()> {
    let cfg = load_config(config)?;
    let mut endpoint = cfg.feed.to_endpoint(cfg.setpoint());
    if let Some(host) = host {
        endpoint.host = host;
    }
    if let Some(port) = port {
        endpoint.port = port;
    }

    println!("Connecting to feed at {}:{}", endpoint.host, endpoint.port);

    let mut session = TuningSession::new(RemoteFeed::new(endpoint));
    session.source_mut().connect()?;
    session.start();

    println!("✓ Connected, streaming (max {} samples)", max_samples);

    while session.history().len() < max_samples {
        match session.tick() {
            Ok(_) => {}
            Err(e) => {
                // Reconnection is deliberate, not automatic: report and stop.
                println!("✗ Feed dropped: {}", e);
                break;
            }
        }
    }

    let discarded = session.source().discarded();
    if discarded > 0 {
        println!("  Discarded {} malformed line(s)", discarded);
    }
    print_summary(session.history());
    write_history(session.history(), output)
}

fn cmd_feed(
    bind: &str,
    port: u16,
    period_ms: u64,
    setpoint: f64,
    max_samples: Option<u64>,
) -> AppResult<()> {
    if period_ms == 0 {
        return Err(AppError::InvalidInput(
            "period-ms must be at least 1".to_string(),
        ));
    }

    let server = FeedServer::bind(&format!("{}:{}", bind, port))?;
    let opts = FeedOptions {
        period: Duration::from_millis(period_ms),
        setpoint,
        initial: setpoint,
        max_samples,
        ..FeedOptions::default()
    };

    println!(
        "Feed listening on {}:{} (period {}ms); Ctrl-C to stop",
        bind, port, period_ms
    );
    server.serve_forever(&opts)?;
    Ok(())
}

fn print_summary(samples: &[Sample]) {
    println!("  Samples: {}", samples.len());
    if let (Some(first), Some(last)) = (samples.first(), samples.last()) {
        println!("  Time range: {:.3} - {:.3} s", first.time, last.time);
        println!("  Final error: {:.4}", last.error);
    }
}

fn write_history(samples: &[Sample], output: Option<&Path>) -> AppResult<()> {
    if let Some(path) = output {
        let csv = history_to_csv(samples);
        std::fs::write(path, csv)?;
        println!("✓ Exported {} sample(s) to {}", samples.len(), path.display());
    }
    Ok(())
}
