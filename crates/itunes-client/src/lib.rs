// SPDX-License-Identifier: GPL-3.0-or-later

//! iTunes Search API client.
//!
//! Searches the store catalog by term and filters, or looks items up by
//! their iTunes identifier. Both paths decode into [`SearchResult`].

pub mod client;
pub mod error;
pub mod models;
pub mod query;

pub use client::{ItunesClient, ItunesClientBuilder};
pub use error::{ItunesError, Result};
pub use models::{
    Attribute, Country, Entity, Language, Media, Search, SearchResult, SearchResultItem,
};
pub use query::QueryParams;
pub use tokio_util::sync::CancellationToken;
