pub mod actions;
pub mod playback;
pub mod viewport;

pub use actions::*;
pub use playback::*;
pub use viewport::*;
