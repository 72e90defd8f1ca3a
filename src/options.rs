use clap::{Args, Parser, Subcommand};
use sqlx::mysql::MySqlConnectOptions;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct ConnectionArgs {
    #[arg(long, env = "MYSQL_USER", default_value = "root")]
    pub user: String,
    #[arg(long, env = "MYSQL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    #[arg(long, env = "MYSQL_HOST", default_value = "127.0.0.1")]
    pub host: String,
    #[arg(long, env = "MYSQL_PORT", default_value = "3306")]
    pub port: u16,

    /// Read the table snapshot from a JSON file instead of connecting
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

impl ConnectionArgs {
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user);
        match &self.password {
            Some(password) => options.password(password),
            None => options,
        }
    }
}

#[derive(Args, Debug)]
pub struct TableArgs {
    #[arg(long)]
    pub database: String,
    #[arg(long)]
    pub table: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Review a table's design and print the report
    Analyze {
        #[command(flatten)]
        target: TableArgs,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Evaluate rule families in parallel
        #[arg(long)]
        parallel: bool,
    },
    /// Print a table's columns, indexes, status and DDL
    Describe {
        #[command(flatten)]
        target: TableArgs,
    },
}
