use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use table_advisor::{Analyzer, MetadataProvider, MySqlProvider, StaticProvider};
use tracing::info;

mod options;

use options::{Cli, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // Logs go to stderr so stdout only carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    let provider: Arc<dyn MetadataProvider> = match &args.connection.snapshot {
        Some(path) => {
            info!(path = %path.display(), "Loading snapshot file");
            Arc::new(StaticProvider::from_json_file(path)?)
        }
        None => {
            let options = args.connection.connect_options();
            Arc::new(MySqlProvider::connect_with(options).await?)
        }
    };

    match args.command {
        Command::Analyze {
            target,
            json,
            parallel,
        } => {
            let analyzer = Analyzer::builder(provider)
                .with_parallel_rules(parallel)
                .build();
            let report = analyzer.analyze(&target.database, &target.table).await?;

            if json {
                println!("{}", report.to_json(true)?);
            } else {
                println!("{}", report);
            }
        }
        Command::Describe { target } => {
            let analyzer = Analyzer::builder(provider).build();
            let snapshot = analyzer.describe(&target.database, &target.table).await?;
            println!("{}", snapshot);
        }
    }

    Ok(())
}
