//! Catalog loading
//!
//! The folder listing is fetched once at startup in the background; the
//! result arrives on the UI loop and becomes the menu.

use anyhow::Result;
use tokio::sync::mpsc;

use crate::{App, Listings};
use splitview::api::CatalogClient;
use splitview::logic;
use splitview::model::CatalogState;

/// Fetch the folder list, then every folder's listing
pub(crate) fn spawn_catalog_load(client: CatalogClient, tx: mpsc::UnboundedSender<Result<Listings>>) {
    tokio::spawn(async move {
        let _ = tx.send(fetch_catalog(&client).await);
    });
}

async fn fetch_catalog(client: &CatalogClient) -> Result<Listings> {
    let dirs = client.get_folders().await?;
    log::debug!("Catalog folders: {:?}", dirs);
    client.get_files(dirs).await
}

impl App {
    pub(crate) fn handle_catalog_result(&mut self, result: Result<Listings>) {
        match result {
            Ok(listings) => {
                let catalog = logic::catalog::build_catalog(listings, self.dispatcher.registry());
                log::info!(
                    "Catalog loaded: {} images in {} folders",
                    catalog.file_count(),
                    catalog.groups.len()
                );
                self.model.catalog.set_catalog(catalog);
                self.model.ui.menu_selection = logic::catalog::first_file_row(&self.model.catalog.rows);
                self.model.ui.status_message = None;
            }
            Err(e) => {
                let message = logic::errors::status_message("Catalog unavailable", &e);
                log::error!("Failed to load catalog: {:#}", e);
                self.model.catalog.state = CatalogState::Failed(message.clone());
                self.model.ui.status_message = Some(message);
            }
        }
    }
}
