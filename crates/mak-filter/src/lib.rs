//! Filter engine for the four dependent catalogue dropdowns.
//!
//! Given the fetched rows and the current [`Selection`](mak_model::Selection),
//! the engine works out which values each dropdown may offer, repairs
//! selections that no longer match anything, and returns the rows that pass
//! every active filter.

pub mod engine;
pub mod filter;
pub mod options;

pub use engine::{Evaluation, FilterEngine, Outcome, Reconciliation, Reset};
pub use filter::apply_filter;
pub use options::{OptionSet, OptionSets};
