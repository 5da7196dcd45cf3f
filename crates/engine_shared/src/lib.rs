// crates/engine_shared/src/lib.rs

pub mod input_types;

pub use input_types::{Action, InputSnapshot, InteractionMode, Key, MovementInput, UnknownKeyName};
