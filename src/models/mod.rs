pub mod analysis;
pub mod case;

pub use analysis::*;
pub use case::*;
