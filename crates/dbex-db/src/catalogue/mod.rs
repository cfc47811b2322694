//! Naive vs. optimized data-access pairs.
//!
//! Every group borrows the store and offers `dont_*` / `do_*` operations that
//! return the same observable result for the same store contents. The `do_*`
//! variant always issues fewer statements or reads fewer rows/columns:
//!
//! | Group | Pattern |
//! |---|---|
//! | [`InefficientComputation`] | aggregate / limit in SQL instead of in memory |
//! | [`InefficientDataAccess`] | eager join instead of N+1, projection instead of whole rows |
//! | [`UnnecessaryComputation`] | hoist a loop-invariant query |
//! | [`UnnecessaryDataRetrieval`] | project one column instead of whole rows |

pub mod computation;
pub mod data_access;
pub mod loading;
pub mod notification;
pub mod retrieval;

pub use computation::InefficientComputation;
pub use data_access::InefficientDataAccess;
pub use loading::{AuthorDocuments, AuthorWithDocuments, EagerAuthorDocuments, LazyAuthorDocuments};
pub use notification::{UnnecessaryComputation, yesterday};
pub use retrieval::UnnecessaryDataRetrieval;
