pub mod chat;
pub mod clause;
pub mod state;

pub use chat::*;
pub use clause::*;
pub use state::*;
