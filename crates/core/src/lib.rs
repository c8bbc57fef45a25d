//! `trove-core`: shared building blocks for the inventory domain.
//!
//! This crate contains **pure domain** primitives (no storage concerns).

pub mod collation;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use collation::{collate, fold_case, same_name};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::ItemId;
pub use value_object::ValueObject;
