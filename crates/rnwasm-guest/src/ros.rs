//! Object wrapper over the raw interface.
//!
//! Each type holds a single host handle and each method is exactly one raw
//! call. Nodes borrow their context and publishers borrow their node, so the
//! borrow checker keeps a publisher from outliving what it was created from.
//! The host owns every handle; nothing here is ever freed.

use std::marker::PhantomData;

use crate::raw;

pub struct Context {
    rn_context: *mut raw::RNContext,
}

pub struct Node<'a> {
    rn_node: *mut raw::RNNode,
    _context: PhantomData<&'a Context>,
}

pub struct Publisher<'a> {
    rn_publisher: *mut raw::RNPublisher,
    _node: PhantomData<&'a Node<'a>>,
}

pub struct StdMsgString {
    rn_std_msg_string: *mut raw::RNStdMsgString,
}

impl Default for Context {
    /// The host's default context.
    fn default() -> Self {
        Context {
            rn_context: unsafe { raw::rn_get_default_context() },
        }
    }
}

impl Context {
    pub fn create_node(&self, name: &str) -> Node<'_> {
        Node {
            rn_node: unsafe { raw::rn_create_node(self.rn_context, name.as_ptr(), name.len()) },
            _context: PhantomData,
        }
    }

    pub fn as_raw(&self) -> *mut raw::RNContext {
        self.rn_context
    }
}

impl Node<'_> {
    pub fn create_publisher(&self, topic: &str) -> Publisher<'_> {
        Publisher {
            rn_publisher: unsafe {
                raw::rn_create_publisher(self.rn_node, topic.as_ptr(), topic.len())
            },
            _node: PhantomData,
        }
    }

    pub fn as_raw(&self) -> *mut raw::RNNode {
        self.rn_node
    }
}

impl Publisher<'_> {
    /// Hand the message to the host. The host reads the payload during the call.
    pub fn publish(&self, message: &StdMsgString) {
        unsafe {
            raw::rn_publish(self.rn_publisher, message.rn_std_msg_string);
        }
    }

    pub fn as_raw(&self) -> *mut raw::RNPublisher {
        self.rn_publisher
    }
}

impl Default for StdMsgString {
    /// A new, empty `std_msgs/String` owned by the host.
    fn default() -> Self {
        StdMsgString {
            rn_std_msg_string: unsafe { raw::rn_std_msg_string_default() },
        }
    }
}

impl StdMsgString {
    /// Replace the message payload with `data`.
    pub fn set(&mut self, data: &str) {
        unsafe {
            raw::rn_std_msg_string_set_data(self.rn_std_msg_string, data.as_ptr(), data.len());
        }
    }

    pub fn as_raw(&self) -> *mut raw::RNStdMsgString {
        self.rn_std_msg_string
    }
}

/// Block the calling thread in the host for `millis` milliseconds.
pub fn sleep(millis: u32) {
    unsafe {
        raw::rn_thread_sleep(millis);
    }
}
