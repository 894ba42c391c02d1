use rnwasm_host::{HandleKind, HostConfig, HostError, Runtime};

const IMPORTS: &str = r#"
  (import "env" "rn_get_default_context" (func $context (result i32)))
  (import "env" "rn_create_node" (func $node (param i32 i32 i32) (result i32)))
  (import "env" "rn_create_publisher" (func $publisher (param i32 i32 i32) (result i32)))
  (import "env" "rn_std_msg_string_default" (func $message (result i32)))
  (import "env" "rn_std_msg_string_set_data" (func $set (param i32 i32 i32)))
  (import "env" "rn_publish" (func $publish (param i32 i32)))
  (import "env" "rn_thread_sleep" (func $sleep (param i32)))
  (import "env" "rn_log" (func $log (param i32 i32)))
  (memory (export "memory") 1)
  (data (i32.const 0) "node")
  (data (i32.const 8) "topic")
  (data (i32.const 16) "Hello Rust ROS! 0")
  (data (i32.const 40) "Hello Rust ROS! 1")
  (data (i32.const 64) "talker up")
"#;

/// A module whose `ros_main` runs `body` after the shared imports.
fn module(body: &str) -> String {
    format!("(module {IMPORTS} (func (export \"ros_main\") (local $n i32) (local $p i32) (local $m i32) {body}))")
}

const TALKER: &str = r#"
  (local.set $n (call $node (call $context) (i32.const 0) (i32.const 4)))
  (local.set $p (call $publisher (local.get $n) (i32.const 8) (i32.const 5)))
  (local.set $m (call $message))
  (call $log (i32.const 64) (i32.const 9))
  (call $set (local.get $m) (i32.const 16) (i32.const 17))
  (call $publish (local.get $p) (local.get $m))
  (call $sleep (i32.const 1000))
  (call $set (local.get $m) (i32.const 40) (i32.const 17))
  (call $publish (local.get $p) (local.get $m))
  (call $sleep (i32.const 1000))
"#;

fn fast_runtime() -> Runtime {
    let config = HostConfig {
        time_scale: 0.0,
        ..HostConfig::default()
    };
    Runtime::new(config).unwrap()
}

fn run(body: &str) -> Result<rnwasm_host::RunReport, HostError> {
    let runtime = fast_runtime();
    let module = runtime.load_bytes(module(body).as_bytes()).unwrap();
    runtime.run(&module)
}

#[test]
fn talker_module_publishes_in_order() {
    let report = run(TALKER).unwrap();
    expect_test::expect![[r#"
        topic: Hello Rust ROS! 0
        topic: Hello Rust ROS! 1"#]]
    .assert_eq(&report.render_published());
    assert!(report.published.iter().all(|p| p.node == "node"));
    assert_eq!(report.guest_log, vec!["talker up".to_string()]);
}

#[test]
fn handles_returned_to_guest_are_non_null() {
    // Traps through `unreachable` if any creation call returned 0.
    let body = r#"
      (if (i32.eqz (call $context)) (then unreachable))
      (if (i32.eqz (call $message)) (then unreachable))
      (if (i32.eqz (call $node (call $context) (i32.const 0) (i32.const 4))) (then unreachable))
    "#;
    run(body).unwrap();
}

#[test]
fn default_context_is_stable_across_calls() {
    let body = r#"
      (if (i32.ne (call $context) (call $context)) (then unreachable))
    "#;
    run(body).unwrap();
}

#[test]
fn unknown_publisher_handle_traps_with_host_error() {
    let body = r#"
      (call $publish (i32.const 42) (call $message))
    "#;
    match run(body) {
        Err(HostError::UnknownHandle { kind, handle }) => {
            assert_eq!(kind, HandleKind::Publisher);
            assert_eq!(handle, 42);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn out_of_bounds_name_is_reported() {
    let body = r#"
      (drop (call $node (call $context) (i32.const 65534) (i32.const 4)))
    "#;
    match run(body) {
        Err(HostError::OutOfBounds { ptr, len }) => assert_eq!((ptr, len), (65534, 4)),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn guest_trap_is_reported_as_trap() {
    match run("unreachable") {
        Err(HostError::Trap(_)) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn missing_entry_point_is_reported() {
    let config = HostConfig {
        entry_point: "start".to_string(),
        time_scale: 0.0,
        ..HostConfig::default()
    };
    let runtime = Runtime::new(config).unwrap();
    let module = runtime.load_bytes(module("").as_bytes()).unwrap();
    match runtime.run(&module) {
        Err(HostError::EntryPointNotFound(name)) => assert_eq!(name, "start"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn module_without_memory_cannot_pass_strings() {
    let wat = r#"
      (module
        (import "env" "rn_log" (func $log (param i32 i32)))
        (func (export "ros_main") (call $log (i32.const 0) (i32.const 1))))
    "#;
    let runtime = fast_runtime();
    let module = runtime.load_bytes(wat.as_bytes()).unwrap();
    assert!(matches!(runtime.run(&module), Err(HostError::MissingMemory)));
}

#[test]
fn check_lists_unsupported_imports() {
    let wat = r#"
      (module
        (import "env" "rn_publish" (func (param i32 i32)))
        (import "env" "rn_create_subscription" (func (param i32 i32 i32 i32) (result i32)))
        (import "wasi" "fd_write" (func (param i32 i32 i32 i32) (result i32))))
    "#;
    let runtime = fast_runtime();
    let module = runtime.load_bytes(wat.as_bytes()).unwrap();
    assert_eq!(runtime.unsupported_imports(&module), vec!["rn_create_subscription"]);
    assert!(matches!(
        runtime.check(&module),
        Err(HostError::UnsupportedImports(names)) if names == ["rn_create_subscription"]
    ));
}

#[test]
fn custom_import_module_is_honoured() {
    let wat = r#"
      (module
        (import "ros" "rn_get_default_context" (func $context (result i32)))
        (func (export "ros_main") (drop (call $context))))
    "#;
    let config = HostConfig {
        import_module: "ros".to_string(),
        ..HostConfig::default()
    };
    let runtime = Runtime::new(config).unwrap();
    let module = runtime.load_bytes(wat.as_bytes()).unwrap();
    runtime.check(&module).unwrap();
    runtime.run(&module).unwrap();
}

#[test]
fn fuel_limit_stops_runaway_guests() {
    let wat = r#"
      (module
        (func (export "ros_main") (loop $spin (br $spin))))
    "#;
    let config = HostConfig {
        fuel: Some(10_000),
        ..HostConfig::default()
    };
    let runtime = Runtime::new(config).unwrap();
    let module = runtime.load_bytes(wat.as_bytes()).unwrap();
    assert!(matches!(runtime.run(&module), Err(HostError::Trap(_))));
}

#[test]
fn load_file_accepts_text_modules() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("talker.wat");
    std::fs::write(&path, module(TALKER)).unwrap();
    let runtime = fast_runtime();
    let module = runtime.load_file(&path).unwrap();
    assert_eq!(runtime.run(&module).unwrap().published.len(), 2);
}
