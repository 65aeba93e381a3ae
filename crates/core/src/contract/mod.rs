pub mod matching;
pub mod types;

pub use matching::{match_signature, Mismatch, Slot};
pub use types::*;
