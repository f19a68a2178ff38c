//! App Orchestration Methods
//!
//! This module contains App implementation methods grouped by domain.
//! Each submodule contains methods that orchestrate between:
//! - Model state (pure, in src/model/)
//! - Services (catalog client, image loader)
//! - Handlers (in src/handlers/)
//! - Logic (pure business logic in src/logic/)
//! - UI rendering (in src/ui/)

pub(crate) mod catalog;
pub(crate) mod menu;
pub(crate) mod preview;
pub(crate) mod snapshot;
pub(crate) mod split;

pub(crate) use catalog::spawn_catalog_load;
