pub mod types;
pub mod config;
pub mod text;
pub mod classifier;
pub mod trigger;
pub mod filter;
pub mod codec;
pub mod tracker;
pub mod wasm;

pub use types::*;
pub use config::*;
pub use classifier::*;
pub use trigger::*;
pub use filter::*;
pub use codec::*;
pub use tracker::*;
pub use wasm::*;

#[cfg(test)]
mod tests;
