pub mod frame;
pub mod picking;
pub mod records;
pub mod state;

pub use frame::*;
pub use picking::*;
pub use records::*;
pub use state::*;
