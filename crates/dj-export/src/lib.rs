pub mod error;
pub mod export;
pub mod source;
pub mod store;

pub use error::*;
pub use export::*;
pub use source::*;
pub use store::*;
