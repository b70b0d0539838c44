//! Target schemas and their resolution against outlines.

mod matcher;
mod schema;

pub use matcher::{resolve, MatchOutcome, TargetMatch};
pub use schema::{TargetNode, TargetSchema};
