use std::fmt;

use slab::Slab;

use crate::error::{HostError, HostResult};

/// Which table a guest handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    Context,
    Node,
    Publisher,
    StdMsgString,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandleKind::Context => "context",
            HandleKind::Node => "node",
            HandleKind::Publisher => "publisher",
            HandleKind::StdMsgString => "std_msgs/String",
        };
        f.write_str(name)
    }
}

/// Objects handed to the guest, addressed by `u32` handles.
///
/// A handle is the slab key plus one, so 0 (null on the guest side) is never
/// issued. Entries are never removed.
pub struct HandleTable<T> {
    kind: HandleKind,
    entries: Slab<T>,
}

impl<T> HandleTable<T> {
    pub fn new(kind: HandleKind) -> Self {
        Self {
            kind,
            entries: Slab::new(),
        }
    }

    pub fn insert(&mut self, value: T) -> u32 {
        let key = self.entries.insert(value);
        (key + 1) as u32
    }

    pub fn get(&self, handle: u32) -> HostResult<&T> {
        let kind = self.kind;
        Self::key(handle)
            .and_then(|key| self.entries.get(key))
            .ok_or(HostError::UnknownHandle { kind, handle })
    }

    pub fn get_mut(&mut self, handle: u32) -> HostResult<&mut T> {
        let kind = self.kind;
        Self::key(handle)
            .and_then(|key| self.entries.get_mut(key))
            .ok_or(HostError::UnknownHandle { kind, handle })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(handle: u32) -> Option<usize> {
        (handle as usize).checked_sub(1)
    }
}
