//! Compile-time registry of dataset definitions.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.
//! Adding a dataset requires creating a TOML file in `datasets/` and adding
//! a corresponding entry here.

use prop_map_symbols_models::DatasetDefinition;

use crate::LoadError;

/// Number of registered datasets. Enforced by a test.
#[cfg(test)]
const EXPECTED_DATASET_COUNT: usize = 3;

/// Embedded TOML dataset definitions.
const DATASET_TOMLS: &[(&str, &str)] = &[
    (
        "renewable_generation",
        include_str!("../datasets/renewable_generation.toml"),
    ),
    ("mega_cities", include_str!("../datasets/mega_cities.toml")),
    (
        "mega_cities_population",
        include_str!("../datasets/mega_cities_population.toml"),
    ),
];

/// Returns all registered datasets.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error
/// and are caught by the tests below.
#[must_use]
pub fn all_datasets() -> Vec<DatasetDefinition> {
    DATASET_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse dataset '{name}': {e}"))
        })
        .collect()
}

/// Looks up a registered dataset by id.
///
/// # Errors
///
/// Returns [`LoadError::UnknownDataset`] if no dataset has this id.
pub fn find_dataset(id: &str) -> Result<DatasetDefinition, LoadError> {
    all_datasets()
        .into_iter()
        .find(|d| d.id == id)
        .ok_or_else(|| LoadError::UnknownDataset(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prop_map_symbols_models::{DataSource, LayerKind};
    use std::collections::BTreeSet;

    #[test]
    fn loads_all_datasets() {
        let datasets = all_datasets();
        assert_eq!(
            datasets.len(),
            EXPECTED_DATASET_COUNT,
            "Expected {EXPECTED_DATASET_COUNT} datasets, found {}. \
             Update EXPECTED_DATASET_COUNT after adding/removing datasets.",
            datasets.len()
        );
    }

    #[test]
    fn dataset_ids_are_unique() {
        let mut seen = BTreeSet::new();
        for dataset in &all_datasets() {
            assert!(
                seen.insert(dataset.id.clone()),
                "Duplicate dataset ID: {}",
                dataset.id
            );
        }
    }

    #[test]
    fn registry_names_match_ids() {
        for ((name, _), dataset) in DATASET_TOMLS.iter().zip(all_datasets()) {
            assert_eq!(*name, dataset.id);
        }
    }

    #[test]
    fn renewable_generation_definition() {
        let dataset = find_dataset("renewable_generation").unwrap();
        assert_eq!(dataset.kind, LayerKind::Proportional);
        assert_eq!(dataset.popup.unit, "%");
        assert_eq!(dataset.style.fill_color, "#dd0");
        assert!((dataset.min_radius() - 5.0).abs() < f64::EPSILON);
        assert!(matches!(dataset.source, DataSource::File { .. }));
        assert!(dataset.identifying_fields.matches("country"));
    }

    #[test]
    fn partial_style_falls_back_to_defaults() {
        let dataset = find_dataset("mega_cities_population").unwrap();
        assert_eq!(dataset.style.fill_color, "#ff7800");
        assert_eq!(dataset.style.color, "#000");
        assert_eq!(dataset.popup.unit, "");
    }

    /// Registry paths are relative to the workspace root, where the
    /// binaries are run from.
    fn workspace_source(source: &DataSource) -> DataSource {
        match source {
            DataSource::File { path } => DataSource::File {
                path: std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
                    .join("../..")
                    .join(path)
                    .to_string_lossy()
                    .into_owned(),
            },
            DataSource::Url { .. } => source.clone(),
        }
    }

    #[tokio::test]
    async fn every_registered_source_loads() {
        for dataset in all_datasets() {
            let collection = crate::load_collection(&workspace_source(&dataset.source))
                .await
                .unwrap_or_else(|e| panic!("Dataset '{}' failed to load: {e}", dataset.id));
            assert!(
                !collection.features.is_empty(),
                "Dataset '{}' has no features",
                dataset.id
            );
            assert!(
                collection
                    .features
                    .iter()
                    .all(|f| f.properties.is_some() && f.geometry.is_some()),
                "Dataset '{}' has features without properties or geometry",
                dataset.id
            );
        }
    }

    #[test]
    fn unknown_dataset_is_an_error() {
        assert!(matches!(
            find_dataset("nope"),
            Err(LoadError::UnknownDataset(_))
        ));
    }
}
