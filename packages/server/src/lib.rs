#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for proportional symbol maps.
//!
//! Loads one [`MapSession`] at startup and exposes it to a web map
//! frontend: map setup, the styled marker `GeoJSON`, and the sequence
//! controls. Every control request runs one synchronous update pass under
//! the session lock.

mod handlers;
pub mod interactive;

use std::path::Path;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use prop_map_session::config::MapConfig;
use prop_map_session::geojson_renderer::GeoJsonRenderer;
use prop_map_session::{MapSession, SessionError};
use thiserror::Error;

/// Errors that can stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared application state.
pub struct AppState {
    /// The displayed map. Control requests are serialized by the lock.
    pub session: Mutex<MapSession<GeoJsonRenderer>>,
}

impl AppState {
    #[must_use]
    pub const fn new(session: MapSession<GeoJsonRenderer>) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/map", web::get().to(handlers::map))
            .route("/symbols", web::get().to(handlers::symbols))
            .route(
                "/sequence/step/{direction}",
                web::post().to(handlers::step),
            )
            .route("/sequence/index", web::post().to(handlers::set_index)),
    );
}

/// Address the HTTP server listens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bind {
    pub addr: String,
    pub port: u16,
}

impl Bind {
    /// Reads `BIND_ADDR` (default `127.0.0.1`) and `PORT` (default `8080`).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("BIND_ADDR").ok(),
            std::env::var("PORT").ok(),
        )
    }

    fn from_vars(addr: Option<String>, port: Option<String>) -> Self {
        Self {
            addr: addr.unwrap_or_else(|| "127.0.0.1".to_string()),
            port: port.and_then(|p| p.parse().ok()).unwrap_or(8080),
        }
    }
}

/// Starts the map server for the config file at `config_path`, bound to
/// [`Bind::from_env`]. The caller provides the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns [`ServerError`] if the config or dataset cannot be loaded, or
/// if the HTTP server fails to bind or run.
#[allow(clippy::future_not_send)]
pub async fn run_server(config_path: &Path) -> Result<(), ServerError> {
    log::info!("Reading map config from {}", config_path.display());
    let config = MapConfig::load_from_file(config_path).map_err(SessionError::from)?;
    serve(&config, Bind::from_env()).await
}

/// Loads the configured dataset and serves it on `bind`.
///
/// The dataset is loaded before binding, so a bad dataset is reported
/// instead of serving an empty map.
///
/// # Errors
///
/// Returns [`ServerError`] if the dataset cannot be loaded, or if the HTTP
/// server fails to bind or run.
#[allow(clippy::future_not_send)]
pub async fn serve(config: &MapConfig, bind: Bind) -> Result<(), ServerError> {
    let session = MapSession::load(config, GeoJsonRenderer::new()).await?;
    let state = web::Data::new(AppState::new(session));

    log::info!("Starting server on {}:{}", bind.addr, bind.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind.addr, bind.port))?
    .run()
    .await?;

    Ok(())
}
