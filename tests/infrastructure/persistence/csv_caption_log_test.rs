use tempfile::TempDir;

use vidscribe::application::ports::CaptionLog;
use vidscribe::domain::CaptionRecord;
use vidscribe::infrastructure::persistence::CsvCaptionLog;

#[tokio::test]
async fn given_fresh_log_when_appending_then_header_is_written_first() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("captions.csv");
    let log = CsvCaptionLog::new(path.clone());

    log.append(&CaptionRecord::new(
        "clip.mp4".to_string(),
        "a dog runs".to_string(),
    ))
    .await
    .unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("Filename,Caption"));
    assert_eq!(lines.next(), Some("clip.mp4,a dog runs"));
}

#[tokio::test]
async fn given_existing_log_when_appending_then_header_is_not_repeated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("captions.csv");
    let log = CsvCaptionLog::new(path.clone());

    log.append(&CaptionRecord::new("a.mp4".to_string(), "one".to_string()))
        .await
        .unwrap();
    log.append(&CaptionRecord::new("b.mp4".to_string(), "two".to_string()))
        .await
        .unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let header_count = contents
        .lines()
        .filter(|line| *line == "Filename,Caption")
        .count();
    assert_eq!(header_count, 1);
    assert_eq!(contents.lines().count(), 3);
}

#[tokio::test]
async fn given_caption_with_comma_when_appending_then_field_is_quoted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("captions.csv");
    let log = CsvCaptionLog::new(path.clone());

    log.append(&CaptionRecord::new(
        "clip.mp4".to_string(),
        "a dog, and a cat".to_string(),
    ))
    .await
    .unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("\"a dog, and a cat\""));
}
