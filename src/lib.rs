pub mod convert;
pub mod feed;
pub mod tabular;

mod error;

pub use error::Error;
pub use gmailfilter_model::{Actions, Filter, FilterSet, LogicExpression, Match};
