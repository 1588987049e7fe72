//! Store operations over the linkhoard entities.
//!
//! Each submodule owns one table family: items, lists and their memberships,
//! the GitHub stars sync state, and API tokens. Functions take a
//! [`sea_orm::DatabaseConnection`] and return [`RepositoryError`] on failure.
//! The writes a stars sync makes accept any [`sea_orm::ConnectionTrait`] so
//! they can share one transaction.

pub mod item;
pub mod list;
pub mod sync_state;
pub mod token;

mod errors;

pub use errors::{RepositoryError, Result};
pub use item::{ItemFilter, NewItem, find_duplicate, is_duplicate};
pub use list::NewList;
