//! Core types and component logic for the character store.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! actor linkage, character persistence and relationship synchronization
//! components are plain functions generic over [`UnitOfWork`]; storage
//! backends provide the unit of work, higher layers drive the components
//! through [`store::CharacterStore`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod actors;
pub mod character;
pub mod characters;
pub mod context;
pub mod error;
pub mod import;
pub mod relationship;
pub mod relationships;
pub mod search;
pub mod store;
pub mod unit_of_work;

pub use context::Context;
pub use error::{Error, Result};
pub use unit_of_work::UnitOfWork;

#[cfg(test)]
mod memory;
