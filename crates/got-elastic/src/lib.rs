//! Elasticsearch passthrough for character search.
//!
//! [`ElasticClient`] implements [`got_core::search::SearchIndex`] by sending
//! a fuzzy `multi_match` query to `{host}/{index}/_search` and mapping the
//! hit sources back onto the wire model.

mod client;
pub mod error;

pub use client::{DEFAULT_INDEX, ElasticClient, build_query};
pub use error::{Error, Result};
