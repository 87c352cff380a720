pub mod features;
pub mod heuristic;
pub mod result;

pub use features::*;
pub use heuristic::*;
pub use result::*;
