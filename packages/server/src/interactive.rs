//! Interactive server start.
//!
//! Prompts for the dataset to show and the address to listen on, then
//! starts the server.

use std::path::Path;

use dialoguer::{Confirm, Input, Select};
use prop_map_loader::registry::all_datasets;
use prop_map_session::SessionError;
use prop_map_session::config::{DatasetSelection, MapConfig};

use crate::{Bind, ServerError};

/// One entry of the dataset menu.
#[derive(Debug, Clone, PartialEq)]
struct DatasetChoice {
    label: String,
    selection: DatasetSelection,
}

/// The config file's own dataset first, then every other registered
/// dataset.
fn dataset_choices(config: &MapConfig) -> Vec<DatasetChoice> {
    let configured_id = match &config.dataset {
        DatasetSelection::Registry { id } => id.as_str(),
        DatasetSelection::Inline(definition) => definition.id.as_str(),
    };

    let mut choices = vec![DatasetChoice {
        label: format!("{configured_id} (from config)"),
        selection: config.dataset.clone(),
    }];
    choices.extend(
        all_datasets()
            .into_iter()
            .filter(|dataset| dataset.id != configured_id)
            .map(|dataset| DatasetChoice {
                label: format!("{} - {}", dataset.id, dataset.name),
                selection: DatasetSelection::Registry { id: dataset.id },
            }),
    );
    choices
}

/// Reads the config at `config_path`, asks which dataset to serve and
/// where to listen, then delegates to [`crate::serve`].
///
/// Address and port prompts default to `BIND_ADDR` and `PORT`.
///
/// # Errors
///
/// Returns [`ServerError`] if the config cannot be read or the server
/// fails to start.
#[allow(clippy::future_not_send)]
pub async fn run(config_path: &Path) -> Result<(), ServerError> {
    println!("Proportional Symbol Map Server");
    println!();

    let mut config = MapConfig::load_from_file(config_path).map_err(SessionError::from)?;

    let choices = dataset_choices(&config);
    let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
    let selected = Select::new()
        .with_prompt("Dataset")
        .items(&labels)
        .default(0)
        .interact()
        .unwrap_or(0);
    if let Some(choice) = choices.into_iter().nth(selected) {
        config.dataset = choice.selection;
    }

    let defaults = Bind::from_env();
    let addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.addr.clone())
        .interact_text()
        .unwrap_or(defaults.addr);
    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    if !Confirm::new()
        .with_prompt(format!("Start server on {addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    crate::serve(&config, Bind { addr, port }).await
}
