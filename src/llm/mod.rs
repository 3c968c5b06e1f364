pub mod client;
pub mod generator;
pub mod prompts;

#[cfg(test)]
pub(crate) mod testing;

pub use client::*;
pub use generator::*;
pub use prompts::*;
