//! Input/output helpers.
//!
//! - removed-column notes recovered from the source text (`comments`)
//! - canonical YAML/JSON rendering (`emit`)
//! - external cardinality tables (`cardinality`)

pub mod cardinality;
pub mod comments;
pub mod emit;

pub use cardinality::*;
pub use comments::removed_notes;
pub use emit::*;
