use clap::{Parser, Subcommand};
use colored::Colorize;
use drills::catalog::{self, Drill};
use drills::{logging, DrillsConfig, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[clap(name = "drills", version, about = "Run classic programming drills")]
struct Args {
    #[clap(subcommand)]
    command: Command,
    #[clap(long, global = true, help = "Path to a TOML config file")]
    config: Option<PathBuf>,
    #[clap(
        long,
        global = true,
        env = "DRILLS_LOG_LEVEL",
        help = "Logging level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every drill with its category and summary
    List,
    /// Run the named drills in order
    Run {
        #[clap(required = true)]
        names: Vec<String>,
    },
    /// Run every drill
    All,
}

fn load_config(args: &Args) -> Result<DrillsConfig> {
    let mut config = match &args.config {
        Some(path) => DrillsConfig::load(path)?,
        None => DrillsConfig::default(),
    };
    if let Some(level) = &args.log_level {
        config.log.level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

fn print_drill(drill: &Drill, config: &DrillsConfig) -> Result<()> {
    println!("{} {}", "==>".cyan().bold(), drill.name.bold());
    for line in catalog::run(drill.name, config)? {
        println!("    {line}");
    }
    Ok(())
}

fn execute(args: &Args, config: &DrillsConfig) -> Result<()> {
    match &args.command {
        Command::List => {
            for drill in catalog::catalog() {
                println!(
                    "{:<20} {:<12} {}",
                    drill.name.green(),
                    drill.category.to_string().yellow(),
                    drill.summary
                );
            }
        }
        Command::Run { names } => {
            // Resolve every name first so a typo fails before anything runs.
            let drills = names
                .iter()
                .map(|name| catalog::find(name))
                .collect::<Result<Vec<_>>>()?;
            for drill in drills {
                print_drill(drill, config)?;
            }
        }
        Command::All => {
            for drill in catalog::catalog() {
                print_drill(drill, config)?;
            }
            println!("{}", format!("{} drills passed", catalog::catalog().len()).green());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.log.level);
    info!(
        cpus = num_cpus::get(),
        workers = config.pool.workers,
        "drills starting"
    );

    match execute(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "drill failed");
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
