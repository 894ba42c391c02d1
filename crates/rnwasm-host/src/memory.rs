//! Reading guest buffers out of linear memory.

use wasmtime::{Caller, Extern, Memory};

use crate::error::{HostError, HostResult};
use crate::state::HostState;

fn guest_memory(caller: &mut Caller<'_, HostState>) -> HostResult<Memory> {
    match caller.get_export("memory") {
        Some(Extern::Memory(memory)) => Ok(memory),
        _ => Err(HostError::MissingMemory),
    }
}

/// Copy `len` bytes starting at `ptr` out of the guest's memory.
pub fn read_bytes(caller: &mut Caller<'_, HostState>, ptr: u32, len: u32) -> HostResult<Vec<u8>> {
    let memory = guest_memory(caller)?;
    let mut buffer = vec![0u8; len as usize];
    memory
        .read(&*caller, ptr as usize, &mut buffer)
        .map_err(|_| HostError::OutOfBounds { ptr, len })?;
    Ok(buffer)
}

/// Like [`read_bytes`], but the bytes must be UTF-8.
pub fn read_string(caller: &mut Caller<'_, HostState>, ptr: u32, len: u32) -> HostResult<String> {
    let bytes = read_bytes(caller, ptr, len)?;
    Ok(String::from_utf8(bytes)?)
}
