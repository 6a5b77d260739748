pub mod keys;
pub mod model;

pub use keys::*;
pub use model::*;
