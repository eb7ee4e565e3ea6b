//! WASM bindings for rockem-playback
//!
//! Exposes the queue manager to the browser front end with the same
//! camelCase surface the page scripts call.

pub mod manager;

pub use manager::WasmQueueManager;
