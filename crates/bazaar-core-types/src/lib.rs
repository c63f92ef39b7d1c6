//! Core types shared across bazaar facilities
//!
//! This crate provides foundational types used by the domain, error
//! handling and logging facilities:
//!
//! - **Identifiers**: UniqueEntityId, RequestId
//! - **Schema constants**: Canonical field keys and event names

pub mod ids;
pub mod schema;

pub use ids::{RequestId, UniqueEntityId};
