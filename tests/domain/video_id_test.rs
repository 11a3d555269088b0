use vidscribe::domain::VideoId;

#[test]
fn given_simple_filename_when_deriving_id_then_extension_is_dropped() {
    let id = VideoId::from_filename("holiday.mp4");
    assert_eq!(id.as_str(), "holiday");
}

#[test]
fn given_filename_with_spaces_when_deriving_id_then_spaces_become_underscores() {
    let id = VideoId::from_filename("my holiday clip.mp4");
    assert_eq!(id.as_str(), "my_holiday_clip");
}

#[test]
fn given_filename_with_special_characters_when_deriving_id_then_they_are_replaced() {
    let id = VideoId::from_filename("clip (final)!.mov");
    assert_eq!(id.as_str(), "clip__final__");
}

#[test]
fn given_filename_without_extension_when_deriving_id_then_whole_stem_is_kept() {
    let id = VideoId::from_filename("recording-01");
    assert_eq!(id.as_str(), "recording-01");
}

#[test]
fn given_empty_filename_when_deriving_id_then_id_is_empty() {
    let id = VideoId::from_filename("");
    assert!(id.is_empty());
}

#[test]
fn given_same_filename_when_deriving_twice_then_ids_are_equal() {
    assert_eq!(
        VideoId::from_filename("a b.mp4"),
        VideoId::from_filename("a b.mp4")
    );
}
