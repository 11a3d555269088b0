use vidscribe::domain::{Caption, EMPTY_CAPTION_PLACEHOLDER};

#[test]
fn given_decoded_text_when_wrapped_then_it_is_trimmed() {
    let caption = Caption::from_decoded("  a man rides a bike  ".to_string());
    assert_eq!(caption.as_str(), "a man rides a bike");
}

#[test]
fn given_empty_decode_when_wrapped_then_placeholder_is_substituted() {
    let caption = Caption::from_decoded(String::new());
    assert_eq!(caption.as_str(), EMPTY_CAPTION_PLACEHOLDER);
}

#[test]
fn given_whitespace_only_decode_when_wrapped_then_placeholder_is_substituted() {
    let caption = Caption::from_decoded("   ".to_string());
    assert_eq!(caption.as_str(), EMPTY_CAPTION_PLACEHOLDER);
}
