//! One-shot CLI against the task store
//!
//! Wires the same stack as the server (connect, migrate, repository,
//! service), executes a single subcommand, prints the result as indented
//! JSON, and exits. Any failure terminates the process non-zero.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use database::postgres::PostgresConfig;
use domain_tasks::{InputTask, PgTaskRepository, TaskService};
use eyre::{Result, WrapErr};
use migration::Migrator;

#[derive(Parser)]
#[command(name = "tasks", about = "Manage tasks from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new task
    Add {
        /// Name of the task
        #[arg(long)]
        name: String,
        /// Description of the task
        #[arg(long = "desc")]
        description: String,
    },
    /// Print every stored task
    Find,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Unknown subcommands exit here with clap's usage error
    let cli = Cli::parse();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let config = PostgresConfig::from_env().wrap_err("Failed to load database configuration")?;
    let db = database::postgres::connect_from_config_with_retry(config, None)
        .await
        .wrap_err("Failed to connect to database")?;

    database::postgres::run_migrations::<Migrator>(&db, "tasks")
        .await
        .wrap_err("Failed to run database migrations")?;

    let repository = PgTaskRepository::new(db);
    let service = TaskService::new(repository);

    match cli.command {
        Command::Add { name, description } => {
            let task = service
                .store(InputTask { name, description })
                .await
                .wrap_err("Failed to store task")?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        Command::Find => {
            let tasks = service.fetch_all().await.wrap_err("Failed to fetch tasks")?;
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_requires_name_and_desc() {
        let cli = Cli::try_parse_from(["tasks", "add", "--name", "Buy milk", "--desc", "2%  "])
            .unwrap();
        match cli.command {
            Command::Add { name, description } => {
                assert_eq!(name, "Buy milk");
                assert_eq!(description, "2%  ");
            }
            _ => panic!("expected add subcommand"),
        }

        assert!(Cli::try_parse_from(["tasks", "add", "--name", "Buy milk"]).is_err());
        assert!(Cli::try_parse_from(["tasks", "add"]).is_err());
    }

    #[test]
    fn test_find_takes_no_arguments() {
        let cli = Cli::try_parse_from(["tasks", "find"]).unwrap();
        assert!(matches!(cli.command, Command::Find));
    }

    #[test]
    fn test_unknown_command_is_a_usage_error() {
        assert!(Cli::try_parse_from(["tasks", "frobnicate"]).is_err());
        assert!(Cli::try_parse_from(["tasks"]).is_err());
    }
}
