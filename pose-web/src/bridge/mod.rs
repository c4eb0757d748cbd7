//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] session entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod session;

pub use session::PoseSession;
