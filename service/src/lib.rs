//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts
)]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

use smart_default::SmartDefault;

#[cfg(doc)]
use infra::ContentStore;

pub use self::{command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Number of [`Listing`]s on a page, when not requested explicitly.
    ///
    /// [`Listing`]: domain::Listing
    #[default(10)]
    pub default_page_size: usize,

    /// Number of featured [`Listing`]s, when not requested explicitly.
    ///
    /// [`Listing`]: domain::Listing
    #[default(6)]
    pub featured_limit: usize,

    /// Number of [`Listing`]s on a page of a curation view.
    ///
    /// [`Listing`]: domain::Listing
    #[default(100)]
    pub curation_page_size: usize,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Store> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`ContentStore`] of this [`Service`].
    store: Store,
}

impl<Store> Service<Store> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, store: Store) -> Self {
        Self { config, store }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`ContentStore`] of this [`Service`].
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }
}
