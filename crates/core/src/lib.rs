//! `couchguard-core` — document primitives shared by the validation hooks.
//!
//! This crate contains **pure** types (no host or logging concerns). A document
//! is opaque here: hooks only care whether it exists and what kind of write it
//! takes part in.

pub mod document;
pub mod error;

pub use document::{Document, DocumentWrite, WriteKind};
pub use error::{DomainError, DomainResult};
