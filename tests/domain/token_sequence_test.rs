use vidscribe::domain::{TokenSequence, BOS_ID, EOS_ID, PAD_ID};

#[test]
fn given_fresh_sequence_when_started_then_it_holds_only_bos() {
    let seq = TokenSequence::start();
    assert_eq!(seq.as_slice(), &[BOS_ID]);
}

#[test]
fn given_pushed_tokens_when_reading_last_then_most_recent_is_returned() {
    let mut seq = TokenSequence::start();
    seq.push(17);
    seq.push(42);
    assert_eq!(seq.last(), Some(42));
    assert_eq!(seq.len(), 3);
}

#[test]
fn given_control_tokens_when_extracting_content_then_they_are_stripped() {
    let seq = TokenSequence::from_ids(vec![BOS_ID, 10, PAD_ID, 11, EOS_ID]);
    assert_eq!(seq.content_tokens(), vec![10, 11]);
}

#[test]
fn given_only_control_tokens_when_extracting_content_then_result_is_empty() {
    let seq = TokenSequence::from_ids(vec![BOS_ID, EOS_ID]);
    assert!(seq.content_tokens().is_empty());
}
