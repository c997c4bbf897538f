//! SQLite backend for the character store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. [`SqliteUnitOfWork`] adapts a
//! connection or open transaction to [`got_core::UnitOfWork`].

mod encode;
mod schema;
mod store;
mod unit_of_work;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
pub use unit_of_work::SqliteUnitOfWork;
