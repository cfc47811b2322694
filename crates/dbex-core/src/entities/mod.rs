//! Entity structs for the catalogue's fixture records.
//!
//! Each entity maps to a table in the libSQL store. Identifiers are assigned
//! by the store on insert and never change afterwards.

mod account;
mod author;
mod document;
mod user;

pub use account::Account;
pub use author::Author;
pub use document::Document;
pub use user::User;
