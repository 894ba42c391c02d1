use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::handles::HandleKind;

/// Errors raised while configuring, loading or running a guest module.
///
/// Errors raised inside an import function trap the guest and come back out
/// of [`Runtime::run`](crate::Runtime::run) unchanged.
#[derive(Debug, Error, Diagnostic)]
pub enum HostError {
    #[error("Failed to read {path}")]
    #[diagnostic(code(rnwasm::host::io_error))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(rnwasm::host::config_parse),
        help("Check the TOML syntax and field types of the host configuration")
    )]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(rnwasm::host::invalid_config))]
    InvalidConfig(String),

    #[error("Failed to set up the WebAssembly engine: {0}")]
    #[diagnostic(code(rnwasm::host::engine))]
    Engine(String),

    #[error("Failed to compile module: {0}")]
    #[diagnostic(
        code(rnwasm::host::compile),
        help("Modules can be given as binary .wasm or text .wat")
    )]
    Compile(String),

    #[error("Failed to link host functions: {0}")]
    #[diagnostic(code(rnwasm::host::link))]
    Link(String),

    #[error("Failed to instantiate module: {0}")]
    #[diagnostic(
        code(rnwasm::host::instantiate),
        help("Run `rnwasm-host check` to list imports this host does not provide")
    )]
    Instantiate(String),

    #[error("Entry point `{0}` is not exported as a function taking and returning nothing")]
    #[diagnostic(
        code(rnwasm::host::entry_point),
        help("Export it from the guest with `#[no_mangle] pub extern \"C\" fn`")
    )]
    EntryPointNotFound(String),

    #[error("Module imports functions this host does not provide: {}", .0.join(", "))]
    #[diagnostic(code(rnwasm::host::unsupported_imports))]
    UnsupportedImports(Vec<String>),

    #[error("Guest trapped: {0}")]
    #[diagnostic(code(rnwasm::host::trap))]
    Trap(String),

    #[error("Guest used unknown {kind} handle {handle}")]
    #[diagnostic(code(rnwasm::host::unknown_handle))]
    UnknownHandle { kind: HandleKind, handle: u32 },

    #[error("Module does not export a linear memory named `memory`")]
    #[diagnostic(code(rnwasm::host::missing_memory))]
    MissingMemory,

    #[error("Guest buffer at {ptr} with length {len} is outside linear memory")]
    #[diagnostic(code(rnwasm::host::out_of_bounds))]
    OutOfBounds { ptr: u32, len: u32 },

    #[error("Guest string is not valid UTF-8")]
    #[diagnostic(code(rnwasm::host::invalid_utf8))]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

pub type HostResult<T> = Result<T, HostError>;

impl HostError {
    /// Recover the error behind a failed guest call.
    ///
    /// Import functions return `HostError`s wrapped in `wasmtime::Error`; those
    /// are unwrapped again, anything else is reported as a trap.
    pub fn from_guest(error: wasmtime::Error) -> Self {
        match error.downcast::<HostError>() {
            Ok(host) => host,
            Err(other) => HostError::Trap(format!("{other:#}")),
        }
    }
}
