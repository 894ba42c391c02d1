//! The "raw" interface to the functions provided by the host.
//!
//! On `wasm32` these become imports of the `env` module. Strings are passed
//! as a pointer plus a byte length; no terminator is assumed. Every call is
//! assumed to succeed.
//!
//! Only the `std_msgs/String` message is available. Supporting other message
//! types would need generated bindings per message, which this interface does
//! not attempt.

pub enum RNContext {}
pub enum RNNode {}
pub enum RNPublisher {}
pub enum RNStdMsgString {}

#[cfg(target_arch = "wasm32")]
extern "C" {
    pub fn rn_get_default_context() -> *mut RNContext;
    pub fn rn_create_node(rn_context: *mut RNContext, name: *const u8, name_len: usize)
        -> *mut RNNode;
    pub fn rn_create_publisher(rn_node: *mut RNNode, topic: *const u8, topic_len: usize)
        -> *mut RNPublisher;
    pub fn rn_std_msg_string_default() -> *mut RNStdMsgString;
    pub fn rn_std_msg_string_set_data(
        rn_std_msg_string: *mut RNStdMsgString,
        data: *const u8,
        data_len: usize,
    );
    pub fn rn_publish(rn_publisher: *mut RNPublisher, rn_std_msg_string: *const RNStdMsgString);
    pub fn rn_thread_sleep(millis: u32);
    pub fn rn_log(text: *const u8, text_len: usize);
}

#[cfg(not(target_arch = "wasm32"))]
pub use crate::mock::{
    rn_create_node, rn_create_publisher, rn_get_default_context, rn_log, rn_publish,
    rn_std_msg_string_default, rn_std_msg_string_set_data, rn_thread_sleep,
};
