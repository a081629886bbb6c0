#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! `GeoJSON` dataset loading.
//!
//! Reads a `FeatureCollection` from a local file or a URL and exposes the
//! compile-time registry of dataset definitions. Loading is the only
//! asynchronous step of building a map; everything downstream works on
//! the parsed collection.

pub mod registry;

use geojson::{FeatureCollection, GeoJson};
use prop_map_symbols_models::DataSource;
use thiserror::Error;

/// Errors that can occur while loading a dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading a local file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Request for {url} failed with status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status.
        status: reqwest::StatusCode,
    },

    /// The body was not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The body was valid `GeoJSON` but not a `FeatureCollection`.
    #[error("Expected a GeoJSON FeatureCollection, found a {found}")]
    NotACollection {
        /// The kind of object that was found instead.
        found: &'static str,
    },

    /// No dataset with this id is registered.
    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),
}

/// Loads the `FeatureCollection` behind `source`.
///
/// # Errors
///
/// Returns [`LoadError`] if the resource cannot be read or is not a
/// `GeoJSON` `FeatureCollection`.
pub async fn load_collection(source: &DataSource) -> Result<FeatureCollection, LoadError> {
    let body = match source {
        DataSource::File { path } => {
            log::info!("Reading dataset from {path}");
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?
        }
        DataSource::Url { url } => {
            log::info!("Fetching dataset from {url}");
            fetch(&reqwest::Client::new(), url).await?
        }
    };

    let collection = parse_collection(&body)?;
    log::info!("Loaded {} features", collection.features.len());
    Ok(collection)
}

/// Fetches a `GeoJSON` body from `url`.
///
/// # Errors
///
/// Returns [`LoadError`] if the request fails or the status is not a
/// success.
pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<String, LoadError> {
    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    Ok(resp.text().await?)
}

/// Parses a `GeoJSON` document that must be a `FeatureCollection`.
///
/// # Errors
///
/// Returns [`LoadError::GeoJson`] for malformed input and
/// [`LoadError::NotACollection`] for a lone `Feature` or `Geometry`.
pub fn parse_collection(body: &str) -> Result<FeatureCollection, LoadError> {
    match body.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(_) => Err(LoadError::NotACollection { found: "Feature" }),
        GeoJson::Geometry(_) => Err(LoadError::NotACollection { found: "Geometry" }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../../../data/ElectricityGenRenewPercent.geojson");

    #[test]
    fn parses_feature_collection() {
        let collection = parse_collection(SAMPLE).unwrap();
        assert_eq!(collection.features.len(), 5);
    }

    #[test]
    fn keeps_property_order() {
        let collection = parse_collection(SAMPLE).unwrap();
        let keys: Vec<&String> = collection.features[0]
            .properties
            .as_ref()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys[0], "country");
        assert_eq!(keys[3], "2014");
        assert_eq!(keys[12], "2023");
    }

    #[test]
    fn rejects_single_feature() {
        let body = r#"{
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
            "properties": {}
        }"#;
        assert!(matches!(
            parse_collection(body),
            Err(LoadError::NotACollection { found: "Feature" })
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_collection("{ not json"),
            Err(LoadError::GeoJson(_))
        ));
    }

    #[tokio::test]
    async fn loads_from_file() {
        let tmp = std::env::temp_dir().join("prop_map_loader_test_sample.geojson");
        std::fs::write(&tmp, SAMPLE).unwrap();

        let source = DataSource::File {
            path: tmp.to_string_lossy().into_owned(),
        };
        let collection = load_collection(&source).await.unwrap();
        assert_eq!(collection.features.len(), 5);

        let _ = std::fs::remove_file(&tmp);
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        use tokio::io::{AsyncReadExt as _, AsyncWriteExt as _};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0_u8; 1024];
            let _ = socket.read(&mut request).await.unwrap();
            socket
                .write_all(
                    b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                )
                .await
                .unwrap();
        });

        let url = format!("http://{addr}/missing.geojson");
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let result = fetch(&client, &url).await;
        server.await.unwrap();

        match result {
            Err(LoadError::Status {
                url: failed,
                status,
            }) => {
                assert_eq!(failed, url);
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let source = DataSource::File {
            path: "does/not/exist.geojson".to_string(),
        };
        assert!(matches!(
            load_collection(&source).await,
            Err(LoadError::Io { .. })
        ));
    }
}
