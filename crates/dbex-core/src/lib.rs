//! # dbex-core
//!
//! Core types shared by every dbex crate.
//!
//! - Entity structs for the four record kinds (accounts, authors, documents, users)
//! - The `Newsletter` message value handed to notification sinks
//! - Title formatting and the stable content hash used by the catalogue

pub mod entities;
pub mod hash;
pub mod newsletter;
pub mod title;
