pub mod settings;
pub mod types;
pub mod utils;

pub use settings::*;
pub use types::*;
