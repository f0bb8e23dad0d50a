use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoicehub::{
  adapters::http::configure_invoicing_routes,
  application::invoicing::{
    CreateInvoiceUseCase, DashboardStatsUseCase, GetInvoiceDetailsUseCase, ListClientsUseCase,
    ListInvoicesUseCase, ListItemsUseCase,
  },
  domain::invoicing::InvoicingService,
  infrastructure::{
    config::Config,
    persistence::postgres::{
      PostgresClientRepository, PostgresInvoiceRepository, PostgresItemRepository,
    },
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invoicehub=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting InvoiceHub");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database: {}", config.database.url);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        format!(
          "Could not connect to database. Is PostgreSQL running at {}?",
          config.database.url
        ),
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Wire repositories and the invoicing service
  let client_repo = Arc::new(PostgresClientRepository::new(db_pool.clone()));
  let item_repo = Arc::new(PostgresItemRepository::new(db_pool.clone()));
  let invoice_repo = Arc::new(PostgresInvoiceRepository::new(
    db_pool.clone(),
    config.database.statement_timeout_ms,
  ));

  let invoicing_service = Arc::new(InvoicingService::new(client_repo, item_repo, invoice_repo));

  let create_invoice_use_case = Arc::new(CreateInvoiceUseCase::new(invoicing_service.clone()));
  let list_invoices_use_case = Arc::new(ListInvoicesUseCase::new(invoicing_service.clone()));
  let get_invoice_details_use_case =
    Arc::new(GetInvoiceDetailsUseCase::new(invoicing_service.clone()));
  let list_clients_use_case = Arc::new(ListClientsUseCase::new(invoicing_service.clone()));
  let list_items_use_case = Arc::new(ListItemsUseCase::new(invoicing_service.clone()));
  let dashboard_stats_use_case = Arc::new(DashboardStatsUseCase::new(invoicing_service.clone()));

  let bind_addr = (config.server.host.clone(), config.server.port);
  tracing::info!("Listening on {}:{}", config.server.host, config.server.port);

  HttpServer::new(move || {
    App::new().wrap(Logger::default()).service(
      web::scope("/api/v1").configure(|cfg| {
        configure_invoicing_routes(
          cfg,
          create_invoice_use_case.clone(),
          list_invoices_use_case.clone(),
          get_invoice_details_use_case.clone(),
          list_clients_use_case.clone(),
          list_items_use_case.clone(),
          dashboard_stats_use_case.clone(),
        )
      }),
    )
  })
  .bind(bind_addr)?
  .run()
  .await
}
