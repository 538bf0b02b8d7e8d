use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use kinetic_branch::kinetic::blocks::CONDITION_BLOCK_NAME;
use kinetic_branch::kinetic::config::ServerConfig;
use kinetic_branch::kinetic::registry::BlockRegistry;
use kinetic_branch::kinetic::server;
use kinetic_branch::kinetic::suite::{channels_to_json, run_suite, SuiteLoader};
use serde_json::{json, Value};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a block once and print its output channels
    Eval {
        /// Path to a JSON or YAML file holding the block input
        #[arg(short, long, conflicts_with = "input")]
        file: Option<String>,

        /// Block input as inline JSON
        #[arg(short, long)]
        input: Option<String>,

        /// Block name or id
        #[arg(short, long, default_value = CONDITION_BLOCK_NAME)]
        block: String,
    },
    /// Run a suite file and print its report
    Suite {
        /// Path to the suite file
        #[arg(short, long)]
        file: String,
    },
    /// Run the built-in test of every registered block
    SelfTest,
    /// List registered blocks
    Blocks,
    /// Serve the HTTP API
    Serve {
        /// Port to listen on (overrides KINETIC_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn read_input(file: Option<String>, input: Option<String>) -> anyhow::Result<Value> {
    match (file, input) {
        (Some(path), _) => {
            let content =
                std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?;
            if path.ends_with(".json") {
                Ok(serde_json::from_str(&content)?)
            } else {
                Ok(serde_yaml::from_str(&content)?)
            }
        }
        (None, Some(inline)) => Ok(serde_json::from_str(&inline)?),
        (None, None) => bail!("Either --file or --input is required"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let registry = BlockRegistry::with_defaults().await?;

    match args.command {
        Commands::Eval { file, input, block } => {
            let input = read_input(file, input)?;
            let block = registry.resolve(&block).await?;
            let channels = block.execute(input).await?;
            println!("{}", serde_json::to_string_pretty(&channels_to_json(channels))?);
        }
        Commands::Suite { file } => {
            let suite = SuiteLoader::new().load_suite(&file)?;
            let report = run_suite(&registry, &suite).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.success() {
                bail!("{} of {} cases failed", report.failed, report.cases.len());
            }
        }
        Commands::SelfTest => {
            let mut failed = 0;
            for block in registry.list().await {
                if block.test_input().is_none() {
                    continue;
                }
                let report = registry.self_test(block.name()).await?;
                println!(
                    "{}",
                    json!({"block": report.block, "passed": report.passed()})
                );
                if !report.passed() {
                    failed += 1;
                }
            }
            if failed > 0 {
                bail!("{} block self-tests failed", failed);
            }
        }
        Commands::Blocks => {
            for block in registry.list().await {
                println!("{}  {}  {}", block.id(), block.name(), block.description());
            }
        }
        Commands::Serve { port } => {
            let mut config = ServerConfig::from_env()?;
            if let Some(port) = port {
                config.port = port;
            }
            log::info!("Using suites directory: {}", config.suites_dir.display());
            server::serve(config, registry).await?;
        }
    }

    Ok(())
}
