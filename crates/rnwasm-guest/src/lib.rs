//! Guest-side bindings for the rnwasm host interface.
//!
//! This crate is compiled into WebAssembly modules that run inside an rnwasm
//! host. It is split in two layers:
//! - [`raw`]: the imported `rn_*` functions and their opaque handle types
//! - [`ros`]: value types that hold one handle each and forward every method
//!   call to the matching raw function
//!
//! On native targets the raw functions resolve to [`mock`], a recording
//! stand-in with the same signatures, so code written against the wrapper can
//! be unit tested without a host.

pub mod raw;
pub mod ros;
mod logger;

#[cfg(not(target_arch = "wasm32"))]
pub mod mock;

pub use logger::{init_logger, HostLogger};
pub use ros::{sleep, Context, Node, Publisher, StdMsgString};
