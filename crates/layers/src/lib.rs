pub mod layer;
pub mod lines;
pub mod mesh;
pub mod point_cloud;
pub mod symbology;

pub use layer::*;
