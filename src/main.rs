//! Hotel Booking Assistant API server.
//!
//! Reads configuration from a TOML file
//! (~/.config/booking-service/config.toml or `BOOKING_CONFIG`).

use std::future::IntoFuture;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use hotel_booking::infrastructure::database::migrator::Migrator;
use hotel_booking::infrastructure::database::seed;
use hotel_booking::support::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use hotel_booking::{
    create_api_router, default_config_path, init_database, AppConfig, DatabaseConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("BOOKING_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Hotel Booking Assistant API...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // Load the dataset on first boot, when one is configured
    if let Some(seed_file) = &app_cfg.database.seed_file {
        if let Err(e) = seed::seed_from_file(&db, seed_file).await {
            error!("Failed to load seed data: {}", e);
            return Err(e.into());
        }
    }

    // Create default admin if no admins exist
    create_default_admin(&db, &app_cfg).await;

    // ── Shutdown handling ──────────────────────────────────────
    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    // ── REST API server ────────────────────────────────────────
    let app = create_api_router(db.clone(), Some(prometheus_handle));
    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs", addr);

    let graceful = shutdown.clone();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            graceful.wait().await;
            info!("REST API server received shutdown signal");
        })
        .into_future();

    let drain_timeout = shutdown.clone();
    tokio::select! {
        result = server => {
            result?;
            info!("REST API server stopped");
        }
        _ = async {
            drain_timeout.wait().await;
            tokio::time::sleep(std::time::Duration::from_secs(app_cfg.server.shutdown_timeout)).await;
        } => {
            warn!(
                "Graceful shutdown timed out after {}s, aborting open connections",
                app_cfg.server.shutdown_timeout
            );
        }
    }

    // Perform final cleanup
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Hotel Booking Assistant shutdown complete");
    Ok(())
}

/// Create default admin if no admins exist
async fn create_default_admin(db: &sea_orm::DatabaseConnection, app_cfg: &AppConfig) {
    use hotel_booking::auth::password::hash_password;
    use hotel_booking::infrastructure::database::entities::{admin, hotel};
    use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

    let admins_count = admin::Entity::find().count(db).await.unwrap_or(0);

    if admins_count == 0 {
        info!("Creating default admin...");

        let password_hash = match hash_password(&app_cfg.admin.password) {
            Ok(hash) => hash,
            Err(e) => {
                error!("Failed to hash admin password: {}", e);
                return;
            }
        };

        let hotel_id = match &app_cfg.admin.hotel {
            Some(name) => match hotel::Entity::find()
                .filter(hotel::Column::Name.eq(name))
                .one(db)
                .await
            {
                Ok(Some(own_hotel)) => Some(own_hotel.id),
                Ok(None) => {
                    warn!(
                        "Configured admin hotel '{}' does not exist, admin starts unaffiliated",
                        name
                    );
                    None
                }
                Err(e) => {
                    error!("Failed to look up admin hotel: {}", e);
                    None
                }
            },
            None => None,
        };

        let bootstrap = admin::ActiveModel {
            hotel_id: Set(hotel_id),
            username: Set(app_cfg.admin.username.clone()),
            password_hash: Set(password_hash),
            ..Default::default()
        };

        match bootstrap.insert(db).await {
            Ok(_) => {
                info!("Default admin created: {}", app_cfg.admin.username);
                warn!("Please change the default admin password immediately!");
            }
            Err(e) => {
                error!("Failed to create admin: {}", e);
            }
        }
    }
}
