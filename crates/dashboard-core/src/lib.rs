pub mod error;
pub mod filter;
pub mod types;

pub use error::*;
pub use filter::*;
pub use types::*;
