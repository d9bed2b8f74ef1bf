//! Server initialization and lifecycle
//!
//! Wires the whole stack once at startup and hands ownership down:
//! config → tracing → database connection → migrations → repository →
//! service → HTTP and gRPC listeners, each on its own port.

use axum::Router;
use core_config::server::ServerConfig;
use core_config::{Environment, FromEnv, env_or_default};
use database::postgres::PostgresConfig;
use domain_tasks::{PgTaskRepository, TaskService, handlers};
use eyre::{Result, WrapErr};
use migration::Migrator;
use rpc::tasks::tasks_service_server::TasksServiceServer;
use std::net::SocketAddr;
use tonic::codec::CompressionEncoding;
use tonic::transport::Server;
use tonic_health::server::health_reporter;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::service::TasksServiceImpl;

/// Run the server
///
/// This is the main entry point for server initialization. It:
/// 1. Sets up structured logging (env-aware: JSON for prod, pretty for dev)
/// 2. Connects to the database with retry logic
/// 3. Runs pending migrations (additive only)
/// 4. Creates the repository and service layers
/// 5. Serves the HTTP and gRPC listeners until one of them fails
///
/// # Errors
///
/// Returns an error if:
/// - Database configuration is invalid
/// - Database connection or migration fails
/// - Either listener fails to bind
/// - Either server runtime encounters an error
pub async fn run() -> Result<()> {
    // Initialize tracing (env-aware: JSON for prod, pretty for dev)
    let environment = Environment::from_env();
    core_config::tracing::init_tracing(&environment);

    // Load database configuration from environment (DB_URL, local fallback)
    let config = PostgresConfig::from_env().wrap_err("Failed to load database configuration")?;

    // Connect to the database with retry logic
    info!("Connecting to database...");
    let db = database::postgres::connect_from_config_with_retry(config, None)
        .await
        .wrap_err("Failed to connect to database")?;
    info!("Connected to database successfully");

    // Ensure the schema exists before serving traffic
    database::postgres::run_migrations::<Migrator>(&db, "tasks")
        .await
        .wrap_err("Failed to run database migrations")?;

    // Create repository and service layers
    let repository = PgTaskRepository::new(db);
    let service = TaskService::new(repository);

    // HTTP listener
    let server_config = ServerConfig::from_env().wrap_err("Failed to load server configuration")?;
    let router = Router::new()
        .nest("/task", handlers::router(service.clone()))
        .layer(TraceLayer::new_for_http());
    let listener = tokio::net::TcpListener::bind(server_config.address())
        .await
        .wrap_err_with(|| format!("Failed to bind HTTP listener on {}", server_config.address()))?;
    info!("HTTP listener on {}", server_config.address());

    // gRPC listener address from environment or default
    let grpc_host = env_or_default("GRPC_HOST", "[::1]");
    let grpc_port = env_or_default("GRPC_PORT", "50051");
    let grpc_addr_str = format!("{}:{}", grpc_host, grpc_port);
    let grpc_addr: SocketAddr = grpc_addr_str
        .parse()
        .wrap_err_with(|| format!("Failed to parse gRPC address: {}", grpc_addr_str))?;
    info!("TasksService listening on {}", grpc_addr);

    let tasks_service = TasksServiceImpl::new(service);

    // Health reporter for readiness/liveness probes
    let (mut reporter, health_service) = health_reporter();
    reporter
        .set_service_status("tasks.TasksService", tonic_health::ServingStatus::Serving)
        .await;
    // Empty service name covers generic health checks
    reporter
        .set_service_status("", tonic_health::ServingStatus::Serving)
        .await;

    let http_server = async {
        axum::serve(listener, router)
            .await
            .map_err(|e| eyre::eyre!("HTTP server failed: {}", e))
    };

    let grpc_server = async {
        Server::builder()
            .add_service(health_service)
            .add_service(
                TasksServiceServer::new(tasks_service)
                    .accept_compressed(CompressionEncoding::Zstd)
                    .send_compressed(CompressionEncoding::Zstd),
            )
            .serve(grpc_addr)
            .await
            .map_err(|e| eyre::eyre!("gRPC server failed: {}", e))
    };

    // Both listeners run until process termination; the first failure wins
    tokio::try_join!(http_server, grpc_server)?;

    Ok(())
}
