//! Gmail filter model: conditions, effects, and the expansion of `OR`
//! disjunctions into one filter per clause.

mod filter;
mod generate;
mod logic;
mod set;

pub use filter::{Actions, Filter, Match};
pub use logic::{LogicExpression, SEPARATOR};
pub use set::FilterSet;
