//! The classic ROS talker, compiled to WebAssembly.
//!
//! Build with `cargo build -p rnwasm-talker --target wasm32-unknown-unknown`
//! and run the resulting module with `rnwasm-host run`.

use log::LevelFilter;
use rnwasm_guest::{Context, StdMsgString};

pub const NODE_NAME: &str = "node";
pub const TOPIC: &str = "topic";
pub const ITERATIONS: u32 = 10;
pub const PERIOD_MS: u32 = 1000;

/// Entry point called by the host.
#[no_mangle]
pub extern "C" fn ros_main() {
    // Another module may already have installed the logger.
    let _ = rnwasm_guest::init_logger(LevelFilter::Info);

    let context = Context::default();
    let node = context.create_node(NODE_NAME);
    let publisher = node.create_publisher(TOPIC);

    let mut message = StdMsgString::default();

    for i in 0..ITERATIONS {
        let data = format!("Hello Rust ROS! {}", i);
        message.set(&data);
        publisher.publish(&message);
        log::info!("Publishing: '{}'", data);
        rnwasm_guest::sleep(PERIOD_MS);
    }
}
