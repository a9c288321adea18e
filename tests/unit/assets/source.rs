use super::*;

#[test]
fn locator_classification() {
    assert!(matches!(
        ImageSource::from_locator("https://cdn.example.com/f.png"),
        ImageSource::Url(u) if u == "https://cdn.example.com/f.png"
    ));
    assert!(matches!(
        ImageSource::from_locator("http://example.com/f.png"),
        ImageSource::Url(_)
    ));
    assert!(matches!(
        ImageSource::from_locator("data:image/png;base64,AAAA"),
        ImageSource::Base64(_)
    ));
    assert!(matches!(
        ImageSource::from_locator("frames/summer.png"),
        ImageSource::Path(p) if p == std::path::Path::new("frames/summer.png")
    ));
}

#[test]
fn ftp_is_treated_as_a_path() {
    assert!(matches!(
        ImageSource::from_locator("ftp://example.com/f.png"),
        ImageSource::Path(_)
    ));
}

#[test]
fn deserializes_from_locator_string() {
    let src: ImageSource = serde_json::from_str(r#""https://example.com/frame.png""#).unwrap();
    assert_eq!(src.kind(), "url");
}

#[test]
fn debug_hides_payload() {
    let src = ImageSource::Bytes(vec![1, 2, 3]);
    assert_eq!(format!("{src:?}"), "Bytes { len: 3 }");
}
