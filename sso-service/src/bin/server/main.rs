use std::sync::Arc;

use auth::TokenIssuer;
use clap::Parser;
use futures::FutureExt;
use sso_service::config::Config;
use sso_service::domain::identity::service::AuthService;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::inbound::http::router::create_router;
use sso_service::outbound::repositories::SqliteCredentialStore;
use sso_service::proto::auth_server::AuthServer;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Single sign-on credential service.
#[derive(Parser, Debug)]
#[command(name = "sso")]
struct Args {
    /// Configuration file layered over config/default.toml.
    #[arg(long = "config", env = "CONFIG_PATH")]
    config_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    let config = Config::load(args.config_path.as_deref())?;

    init_tracing(&config.env);

    tracing::info!(
        service = "sso",
        version = env!("CARGO_PKG_VERSION"),
        env = %config.env,
        "Service starting"
    );
    tracing::info!(
        storage_path = %config.storage.path,
        grpc_port = config.server.grpc_port,
        http_port = config.server.http_port,
        token_ttl_seconds = config.token.ttl_seconds,
        "Configuration loaded"
    );

    let store = SqliteCredentialStore::connect(&config.storage.path).await?;
    tracing::info!(database = "sqlite", "Database connection pool created");

    store.migrate().await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let token_issuer = Arc::new(TokenIssuer::new(config.token.secret.as_bytes()));
    let auth_service = Arc::new(AuthService::new(Arc::new(store), token_issuer, &config));

    let shutdown = shutdown_signal().shared();

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(Arc::clone(&auth_service));
    let http_shutdown = shutdown.clone();
    let http_server = tokio::spawn(async move {
        axum::serve(http_listener, http_application)
            .with_graceful_shutdown(http_shutdown)
            .await
    });

    let grpc_address = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    let grpc_service = AuthGrpcService::new(Arc::clone(&auth_service));
    let request_timeout = config.server.request_timeout();
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    let grpc_shutdown = shutdown.clone();
    let grpc_server = tokio::spawn(async move {
        Server::builder()
            .timeout(request_timeout)
            .add_service(AuthServer::new(grpc_service))
            .serve_with_shutdown(grpc_address, grpc_shutdown)
            .await
    });

    let (http_result, grpc_result) = tokio::try_join!(http_server, grpc_server)?;
    http_result?;
    grpc_result?;

    tracing::info!("Servers stopped");

    Ok(())
}

fn init_tracing(env: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sso_service=debug,sso=debug,auth=info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match env {
        "local" => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        _ => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                futures::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = futures::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!(signal = "SIGINT", "Stopping application"),
        _ = terminate => tracing::info!(signal = "SIGTERM", "Stopping application"),
    }
}
