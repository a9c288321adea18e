use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(FramegenError::decode("x").to_string().contains("decode error:"));
    assert!(FramegenError::fetch("x").to_string().contains("fetch error:"));
    assert!(
        FramegenError::unsupported_format("x")
            .to_string()
            .contains("unsupported format error:")
    );
    assert!(
        FramegenError::composition("x")
            .to_string()
            .contains("composition error:")
    );
    assert!(
        FramegenError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FramegenError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn in_stage_carries_cause_message() {
    let err = FramegenError::decode("not a png").in_stage("load frame");
    let msg = err.to_string();
    assert!(msg.starts_with("composition error:"));
    assert!(msg.contains("load frame"));
    assert!(msg.contains("not a png"));
    assert!(matches!(err.root_cause(), FramegenError::Decode(_)));
}

#[test]
fn in_stage_does_not_double_wrap() {
    let err = FramegenError::fetch("timeout")
        .in_stage("load poster")
        .in_stage("compose poster");
    let FramegenError::Composition { message, .. } = &err else {
        panic!("expected composition error");
    };
    assert_eq!(message, "load poster: fetch error: timeout");
    assert!(matches!(err.root_cause(), FramegenError::Fetch(_)));
}

#[test]
fn root_cause_of_plain_error_is_itself() {
    let err = FramegenError::validation("bad");
    assert!(matches!(err.root_cause(), FramegenError::Validation(_)));
}
