mod error;
mod grouping;
mod types;

pub use error::*;
pub use grouping::*;
pub use types::*;
