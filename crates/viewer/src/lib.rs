//! View-state and layer composition for the object / point-cloud map viewer.
//!
//! The [`container::Container`] owns the state and composes layers each
//! frame; [`controller`] turns panel edits into partial state updates. Camera,
//! playback and drawing stay with the host and are reached through
//! [`scene::FrameContext`] and [`runtime::Actions`].

pub mod config;
pub mod container;
pub mod controller;
pub mod overlay;

pub use config::*;
pub use container::*;
pub use controller::*;
pub use overlay::*;
