pub mod geodesy;
pub mod local;

pub use geodesy::*;
pub use local::*;
