mod common;

use common::{test_chain, test_params, Behavior, FakeEngine};
use vsview_core::engine::{decode, probe};
use vsview_core::error::ViewerError;
use vsview_core::script::FilterScript;

fn script() -> FilterScript {
    FilterScript::build(&test_params("/tmp/crp/page.png"), &test_chain()).unwrap()
}

#[test]
fn test_decode_returns_first_frame() {
    let engine = FakeEngine::frame(6, 4, 8);
    let frame = decode(&engine, &script()).unwrap();
    assert_eq!(frame.width(), 6);
    assert_eq!(frame.height(), 4);
}

#[test]
fn test_decode_hands_script_to_engine() {
    let engine = FakeEngine::frame(2, 2, 2);
    let script = script();
    decode(&engine, &script).unwrap();
    let seen = engine.scripts.lock().unwrap();
    assert_eq!(seen.as_slice(), &[script.as_str().to_string()]);
}

#[test]
fn test_decode_script_error_carries_diagnostic() {
    let engine = FakeEngine::new(Behavior::ScriptFails(
        "Python exception: name 'foo' is not defined".into(),
    ));
    match decode(&engine, &script()) {
        Err(ViewerError::Script(msg)) => assert!(msg.contains("'foo'")),
        other => panic!("expected script error, got {other:?}"),
    }
}

#[test]
fn test_decode_no_output_node() {
    let engine = FakeEngine::new(Behavior::NoOutput);
    assert!(matches!(
        decode(&engine, &script()),
        Err(ViewerError::NoOutput)
    ));
}

#[test]
fn test_decode_unknown_length() {
    let engine = FakeEngine::new(Behavior::FrameCount(None));
    assert!(matches!(
        decode(&engine, &script()),
        Err(ViewerError::UnknownLength)
    ));
}

#[test]
fn test_decode_zero_length() {
    let engine = FakeEngine::new(Behavior::FrameCount(Some(0)));
    assert!(matches!(
        decode(&engine, &script()),
        Err(ViewerError::UnknownLength)
    ));
}

#[test]
fn test_decode_frame_fetch_error() {
    let engine = FakeEngine::new(Behavior::FetchFails(
        "Image: Somehow the file couldn't be found.".into(),
    ));
    match decode(&engine, &script()) {
        Err(ViewerError::FrameFetch(msg)) => assert!(msg.contains("couldn't be found")),
        other => panic!("expected frame fetch error, got {other:?}"),
    }
}

#[test]
fn test_probe_reports_node_info() {
    let engine = FakeEngine::frame(40, 30, 64);
    let info = probe(&engine, &script()).unwrap();
    assert_eq!((info.width, info.height), (40, 30));
    assert_eq!(info.frame_count, Some(1));
    assert_eq!(info.format, "RGB24");
}

#[test]
fn test_probe_no_output_node() {
    let engine = FakeEngine::new(Behavior::NoOutput);
    assert!(matches!(
        probe(&engine, &script()),
        Err(ViewerError::NoOutput)
    ));
}
