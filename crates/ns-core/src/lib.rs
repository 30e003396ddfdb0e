pub mod error;
pub mod types;
pub mod value;

pub use error::NyanScriptError;
pub use types::*;
pub use value::*;
