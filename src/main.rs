use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use queueflow::analysis::staffing::{first_stable_servers, min_servers_for_wait, staffing_table};
use queueflow::config::{DEFAULT_ARRIVAL_RATE, DEFAULT_SERVERS, DEFAULT_SERVICE_RATE, Settings};
use queueflow::logging::init_logging;
use queueflow::scenario::basic::BasicScenario;
use queueflow::scenario::random::RandomScenario;
use queueflow::scenario::scenario::{ConfiguredScenario, Scenario};
use queueflow::tui::app::App;
use queueflow::{QueueError, compute_metrics, probability_no_wait};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "queueflow", version, about = "M/M/c queue metrics for service pools")]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the settings file's log level
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Full steady-state metrics
    Metrics {
        #[command(flatten)]
        queue: QueueArgs,
        #[arg(long)]
        json: bool,
    },
    /// Probability an arrival is served immediately
    NoWait {
        #[command(flatten)]
        queue: QueueArgs,
    },
    /// Fewest servers meeting a target average wait
    Staff {
        #[arg(short, long, default_value_t = DEFAULT_ARRIVAL_RATE)]
        arrival_rate: f64,
        #[arg(short, long, default_value_t = DEFAULT_SERVICE_RATE)]
        service_rate: f64,
        /// Hours; defaults to the settings file's target
        #[arg(short, long)]
        target_wait: Option<f64>,
        #[arg(long, default_value_t = 100)]
        max_servers: u32,
    },
    /// Interactive terminal dashboard
    Dashboard {
        /// Generate a reproducible random department set
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct QueueArgs {
    /// Arrivals per hour
    #[arg(short, long, default_value_t = DEFAULT_ARRIVAL_RATE)]
    arrival_rate: f64,
    /// Completions per hour per server
    #[arg(short, long, default_value_t = DEFAULT_SERVICE_RATE)]
    service_rate: f64,
    #[arg(short = 'c', long, default_value_t = DEFAULT_SERVERS)]
    servers: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    match cli.command {
        Command::Dashboard { seed } => dashboard(&settings, seed),
        command => {
            init_logging(cli.log_level.as_deref().unwrap_or(&settings.log_level));
            run(command, &settings)
        }
    }
}

// No subscriber here: log lines on stderr would tear the alternate screen.
fn dashboard(settings: &Settings, seed: Option<u64>) -> anyhow::Result<()> {
    let scenario: Box<dyn Scenario> = match seed {
        Some(seed) => RandomScenario::build(seed),
        None if !settings.departments.is_empty() => {
            Box::new(ConfiguredScenario::new(settings.departments.clone()))
        }
        None => BasicScenario::build(),
    };
    let mut app = App::new(scenario.as_ref(), settings.sweep_width);
    queueflow::tui::run(&mut app)?;
    Ok(())
}

fn run(command: Command, settings: &Settings) -> anyhow::Result<()> {
    match command {
        Command::Metrics { queue, json } => {
            info!(
                arrival_rate = queue.arrival_rate,
                service_rate = queue.service_rate,
                servers = queue.servers,
                "computing metrics"
            );
            let metrics = compute_metrics(queue.arrival_rate, queue.service_rate, queue.servers)
                .map_err(describe)?;
            let report = metrics.report();
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("utilization             {:.3}", report.utilization);
                println!("erlang c                {:.3}", report.erlang_c);
                println!("probability no wait     {:.3}", report.prob_no_wait);
                println!("avg wait time           {:.2}", report.avg_wait_time);
                println!("avg queue length        {:.2}", report.avg_queue_length);
                println!("avg time in system      {:.2}", report.avg_time_in_system);
                println!("avg patients in system  {:.2}", report.avg_patients_in_system);
            }
        }
        Command::NoWait { queue } => {
            let p = probability_no_wait(queue.arrival_rate, queue.service_rate, queue.servers)
                .map_err(describe)?;
            println!("{:.3}", p);
        }
        Command::Staff {
            arrival_rate,
            service_rate,
            target_wait,
            max_servers,
        } => {
            let target_wait = target_wait.unwrap_or(settings.target_wait);
            let Some(servers) =
                min_servers_for_wait(arrival_rate, service_rate, target_wait, max_servers)
                    .map_err(describe)?
            else {
                bail!("no pool of up to {} servers meets a {:.2}h wait", max_servers, target_wait);
            };
            println!("minimum servers: {}", servers);

            let from = first_stable_servers(arrival_rate, service_rate).map_err(describe)?;
            let to = servers.saturating_add(settings.sweep_width);
            println!("{:>8}  {:>6}  {:>7}  {:>8}", "servers", "util", "p(wait)", "wait (h)");
            for row in staffing_table(arrival_rate, service_rate, from..=to) {
                if let Some(m) = row.metrics() {
                    let report = m.report();
                    println!(
                        "{:>8}  {:>6.3}  {:>7.3}  {:>8.2}",
                        row.servers(),
                        report.utilization,
                        report.erlang_c,
                        report.avg_wait_time
                    );
                }
            }
        }
        Command::Dashboard { seed } => dashboard(settings, seed)?,
    }
    Ok(())
}

fn describe(err: QueueError) -> anyhow::Error {
    match err.overload_percent() {
        Some(percent) => anyhow::anyhow!("{} (overloaded by {:.1}%)", err, percent),
        None => err.into(),
    }
}
