//! Type definitions

pub mod event;
pub mod line;
pub mod messages;
pub mod suggestion;

pub use event::*;
pub use line::*;
pub use messages::*;
pub use suggestion::*;
