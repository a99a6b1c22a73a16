use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod commands;

use commands::query::DescriptorArgs;

#[derive(Parser)]
#[command(name = "cfk")]
#[command(about = "Continuous futures roll resolver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> overlays)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Print the contract a continuous future resolves to
    Current {
        #[command(flatten)]
        target: Target,

        /// YYYY-MM-DD (midnight UTC) or RFC 3339
        #[arg(long)]
        as_of: String,
    },

    /// Print the forward chain of a continuous future
    Chain {
        #[command(flatten)]
        target: Target,

        /// YYYY-MM-DD (midnight UTC) or RFC 3339
        #[arg(long)]
        as_of: String,
    },

    /// Print which contract is current across a date range
    Schedule {
        #[command(flatten)]
        target: Target,

        /// Range start (inclusive)
        #[arg(long)]
        from: String,

        /// Range end (inclusive)
        #[arg(long)]
        to: String,
    },

    /// Resolve every continuous future listed in a layered config
    Resolve {
        /// Layered config paths in merge order
        #[arg(long = "config", required = true)]
        config_paths: Vec<String>,

        /// Contract roster CSV (overrides /contracts/path)
        #[arg(long)]
        contracts: Option<String>,

        #[arg(long)]
        as_of: String,

        /// Fail instead of warn on unused config keys
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
}

#[derive(Args)]
struct Target {
    /// Contract roster CSV (falls back to $CFK_CONTRACTS_CSV)
    #[arg(long)]
    contracts: Option<String>,

    /// Root symbol (e.g. FO)
    #[arg(long)]
    root: String,

    /// 0 = front contract, 1 = next, ...
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    offset: i64,

    #[arg(long, default_value = "calendar")]
    roll_style: String,
}

impl Target {
    fn split(self) -> Result<(String, DescriptorArgs)> {
        let contracts = commands::contracts_path(self.contracts)?;
        Ok((
            contracts,
            DescriptorArgs {
                root: self.root,
                offset: self.offset,
                roll_style: self.roll_style,
            },
        ))
    }
}

fn main() -> Result<()> {
    // Load .env.local if present (dev convenience). Silent if missing.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(String::as_str).collect();
            let loaded = cfk_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }

        Commands::Current { target, as_of } => {
            let as_of = commands::parse_as_of("--as-of", &as_of)?;
            let (contracts, d) = target.split()?;
            commands::query::current(&contracts, &d, as_of)?;
        }

        Commands::Chain { target, as_of } => {
            let as_of = commands::parse_as_of("--as-of", &as_of)?;
            let (contracts, d) = target.split()?;
            commands::query::chain(&contracts, &d, as_of)?;
        }

        Commands::Schedule { target, from, to } => {
            let from = commands::parse_as_of("--from", &from)?;
            let to = commands::parse_as_of("--to", &to)?;
            let (contracts, d) = target.split()?;
            commands::query::schedule(&contracts, &d, from, to)?;
        }

        Commands::Resolve {
            config_paths,
            contracts,
            as_of,
            strict,
        } => {
            let as_of = commands::parse_as_of("--as-of", &as_of)?;
            commands::resolve::run(&config_paths, contracts, as_of, strict)?;
        }
    }

    Ok(())
}

/// Logs go to stderr; stdout carries only `key=value` output.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
