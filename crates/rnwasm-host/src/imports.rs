//! The `rn_*` functions provided to guest modules.
//!
//! On `wasm32` guest pointers, lengths and handles are all `i32`; they are
//! taken as `u32` here. A `HostError` returned from any of these traps the
//! guest.

use wasmtime::{Caller, Linker};

use crate::error::{HostError, HostResult};
use crate::memory::read_string;
use crate::state::HostState;

/// Names of every function registered by [`add_to_linker`].
pub const IMPORT_NAMES: &[&str] = &[
    "rn_get_default_context",
    "rn_create_node",
    "rn_create_publisher",
    "rn_std_msg_string_default",
    "rn_std_msg_string_set_data",
    "rn_publish",
    "rn_thread_sleep",
    "rn_log",
];

/// Register all host functions under `module`.
pub fn add_to_linker(linker: &mut Linker<HostState>, module: &str) -> HostResult<()> {
    register(linker, module).map_err(|err| HostError::Link(format!("{err:#}")))
}

fn register(linker: &mut Linker<HostState>, module: &str) -> wasmtime::Result<()> {
    linker.func_wrap(module, "rn_get_default_context", |mut caller: Caller<'_, HostState>| {
        log::trace!("rn_get_default_context");
        caller.data_mut().get_default_context()
    })?;

    linker.func_wrap(
        module,
        "rn_create_node",
        |mut caller: Caller<'_, HostState>, context: u32, name_ptr: u32, name_len: u32| -> wasmtime::Result<u32> {
            log::trace!("rn_create_node ({})", context);
            let name = read_string(&mut caller, name_ptr, name_len)?;
            Ok(caller.data_mut().create_node(context, name)?)
        },
    )?;

    linker.func_wrap(
        module,
        "rn_create_publisher",
        |mut caller: Caller<'_, HostState>, node: u32, topic_ptr: u32, topic_len: u32| -> wasmtime::Result<u32> {
            log::trace!("rn_create_publisher ({})", node);
            let topic = read_string(&mut caller, topic_ptr, topic_len)?;
            Ok(caller.data_mut().create_publisher(node, topic)?)
        },
    )?;

    linker.func_wrap(module, "rn_std_msg_string_default", |mut caller: Caller<'_, HostState>| {
        log::trace!("rn_std_msg_string_default");
        caller.data_mut().std_msg_string_default()
    })?;

    linker.func_wrap(
        module,
        "rn_std_msg_string_set_data",
        |mut caller: Caller<'_, HostState>, message: u32, data_ptr: u32, data_len: u32| -> wasmtime::Result<()> {
            log::trace!("rn_std_msg_string_set_data ({})", message);
            let data = read_string(&mut caller, data_ptr, data_len)?;
            Ok(caller.data_mut().std_msg_string_set_data(message, data)?)
        },
    )?;

    linker.func_wrap(
        module,
        "rn_publish",
        |mut caller: Caller<'_, HostState>, publisher: u32, message: u32| -> wasmtime::Result<()> {
            log::trace!("rn_publish ({}, {})", publisher, message);
            Ok(caller.data_mut().publish(publisher, message)?)
        },
    )?;

    linker.func_wrap(module, "rn_thread_sleep", |caller: Caller<'_, HostState>, millis: u32| {
        log::trace!("rn_thread_sleep ({})", millis);
        caller.data().sleep(millis);
    })?;

    linker.func_wrap(
        module,
        "rn_log",
        |mut caller: Caller<'_, HostState>, text_ptr: u32, text_len: u32| -> wasmtime::Result<()> {
            let text = read_string(&mut caller, text_ptr, text_len)?;
            caller.data_mut().guest_log(text);
            Ok(())
        },
    )?;

    Ok(())
}
