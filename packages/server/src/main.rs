#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone map server binary.
//!
//! Reads the map config from the path in `PROP_MAP_CONFIG` (default
//! `prop_map.toml`).

use std::path::PathBuf;

#[actix_web::main]
async fn main() -> Result<(), prop_map_server::ServerError> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config_path = std::env::var("PROP_MAP_CONFIG")
        .map_or_else(|_| PathBuf::from("prop_map.toml"), PathBuf::from);

    prop_map_server::run_server(&config_path).await
}
