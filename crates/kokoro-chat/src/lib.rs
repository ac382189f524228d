//! Chat session controller: orchestrates append -> complete -> parse ->
//! persist for one chat view instance.

pub mod controller;

pub use controller::{ChatController, SendResult};
