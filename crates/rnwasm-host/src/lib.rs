//! Reference host for rnwasm guest modules.
//!
//! The host compiles a WebAssembly module with wasmtime, links the `rn_*`
//! functions the guest imports, and calls the guest's entry point. Handles
//! given to the guest index into per-kind tables. Published messages are
//! recorded and logged; there is no transport behind them.

mod config;
mod error;
mod handles;
mod imports;
mod memory;
mod runtime;
mod state;

pub use config::HostConfig;
pub use error::{HostError, HostResult};
pub use handles::{HandleKind, HandleTable};
pub use imports::{add_to_linker, IMPORT_NAMES};
pub use runtime::{RunReport, Runtime};
pub use state::{HostState, Published};
