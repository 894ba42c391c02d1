//! Native stand-in for the host imports.
//!
//! Every raw function is implemented here with the same signature as its
//! `wasm32` import. Calls are appended to a thread-local trace and creation
//! calls hand out distinct non-null handles, so tests can check exactly which
//! raw calls a piece of guest code made and with which bytes.
//!
//! State is per thread; each test sees only its own calls.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::raw::{RNContext, RNNode, RNPublisher, RNStdMsgString};

/// One recorded call into the raw interface.
///
/// Handles are recorded as addresses; buffers are copied out at call time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawCall {
    GetDefaultContext { returned: usize },
    CreateNode { context: usize, name: Vec<u8>, returned: usize },
    CreatePublisher { node: usize, topic: Vec<u8>, returned: usize },
    StdMsgStringDefault { returned: usize },
    StdMsgStringSetData { message: usize, data: Vec<u8> },
    /// `data` is the message payload at the time of publishing.
    Publish { publisher: usize, message: usize, data: Vec<u8> },
    ThreadSleep { millis: u32 },
    Log { text: Vec<u8> },
}

#[derive(Default)]
struct Recorder {
    last_handle: usize,
    calls: Vec<RawCall>,
    messages: HashMap<usize, Vec<u8>>,
}

impl Recorder {
    fn next_handle(&mut self) -> usize {
        self.last_handle += 1;
        self.last_handle
    }
}

thread_local! {
    static RECORDER: RefCell<Recorder> = RefCell::new(Recorder::default());
}

fn with_recorder<R>(f: impl FnOnce(&mut Recorder) -> R) -> R {
    RECORDER.with(|recorder| f(&mut recorder.borrow_mut()))
}

/// Drain and return every call recorded on this thread so far.
pub fn take_calls() -> Vec<RawCall> {
    with_recorder(|recorder| std::mem::take(&mut recorder.calls))
}

/// Forget all calls, handles and message payloads recorded on this thread.
pub fn reset() {
    with_recorder(|recorder| *recorder = Recorder::default());
}

unsafe fn copy_buffer(ptr: *const u8, len: usize) -> Vec<u8> {
    if len == 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(ptr, len).to_vec()
}

pub unsafe extern "C" fn rn_get_default_context() -> *mut RNContext {
    with_recorder(|recorder| {
        let returned = recorder.next_handle();
        recorder.calls.push(RawCall::GetDefaultContext { returned });
        returned as *mut RNContext
    })
}

pub unsafe extern "C" fn rn_create_node(
    rn_context: *mut RNContext,
    name: *const u8,
    name_len: usize,
) -> *mut RNNode {
    let name = copy_buffer(name, name_len);
    with_recorder(|recorder| {
        let returned = recorder.next_handle();
        recorder.calls.push(RawCall::CreateNode {
            context: rn_context as usize,
            name,
            returned,
        });
        returned as *mut RNNode
    })
}

pub unsafe extern "C" fn rn_create_publisher(
    rn_node: *mut RNNode,
    topic: *const u8,
    topic_len: usize,
) -> *mut RNPublisher {
    let topic = copy_buffer(topic, topic_len);
    with_recorder(|recorder| {
        let returned = recorder.next_handle();
        recorder.calls.push(RawCall::CreatePublisher {
            node: rn_node as usize,
            topic,
            returned,
        });
        returned as *mut RNPublisher
    })
}

pub unsafe extern "C" fn rn_std_msg_string_default() -> *mut RNStdMsgString {
    with_recorder(|recorder| {
        let returned = recorder.next_handle();
        recorder.messages.insert(returned, Vec::new());
        recorder.calls.push(RawCall::StdMsgStringDefault { returned });
        returned as *mut RNStdMsgString
    })
}

pub unsafe extern "C" fn rn_std_msg_string_set_data(
    rn_std_msg_string: *mut RNStdMsgString,
    data: *const u8,
    data_len: usize,
) {
    let data = copy_buffer(data, data_len);
    with_recorder(|recorder| {
        let message = rn_std_msg_string as usize;
        recorder.messages.insert(message, data.clone());
        recorder.calls.push(RawCall::StdMsgStringSetData { message, data });
    })
}

pub unsafe extern "C" fn rn_publish(
    rn_publisher: *mut RNPublisher,
    rn_std_msg_string: *const RNStdMsgString,
) {
    with_recorder(|recorder| {
        let message = rn_std_msg_string as usize;
        let data = recorder.messages.get(&message).cloned().unwrap_or_default();
        recorder.calls.push(RawCall::Publish {
            publisher: rn_publisher as usize,
            message,
            data,
        });
    })
}

pub unsafe extern "C" fn rn_thread_sleep(millis: u32) {
    with_recorder(|recorder| recorder.calls.push(RawCall::ThreadSleep { millis }))
}

pub unsafe extern "C" fn rn_log(text: *const u8, text_len: usize) {
    let text = copy_buffer(text, text_len);
    with_recorder(|recorder| recorder.calls.push(RawCall::Log { text }))
}
