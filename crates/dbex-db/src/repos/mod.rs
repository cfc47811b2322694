//! Repository modules for the fixture records.
//!
//! Each module adds methods to `DbexDb` via `impl DbexDb` blocks. SQL text is
//! exposed as constants so statement counts can be asserted per query.

pub mod account;
pub mod author;
pub mod document;
pub mod user;
