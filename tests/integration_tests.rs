use log_poller::{FilePoller, Line, WatchConfig, watch_log};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tokio_stream::StreamExt;

fn append(path: &Path, content: &str) {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
}

/// Helper function to collect items from a stream with a timeout
async fn collect_stream_items<T>(
    stream: &mut (impl StreamExt<Item = T> + Unpin),
    max_items: usize,
    timeout: Duration,
) -> Vec<T> {
    let mut items = Vec::new();
    let timeout_future = tokio::time::sleep(timeout);
    tokio::pin!(timeout_future);

    while items.len() < max_items {
        tokio::select! {
            item = stream.next() => {
                match item {
                    Some(item) => items.push(item),
                    None => break,
                }
            }
            _ = &mut timeout_future => break,
        }
    }

    items
}

fn texts(lines: Vec<Line>) -> Vec<String> {
    lines.into_iter().map(|line| line.text).collect()
}

#[tokio::test]
async fn test_watch_follows_growth_and_rotation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let config = WatchConfig::default().with_interval(Duration::from_millis(20));

    let mut stream = watch_log(&path, config).await.unwrap();

    append(&path, "hello\n");
    let items = collect_stream_items(&mut stream, 1, Duration::from_secs(2)).await;
    assert_eq!(texts(items), vec!["hello"]);

    append(&path, "wor");
    let items = collect_stream_items(&mut stream, 1, Duration::from_millis(150)).await;
    assert!(items.is_empty(), "Unterminated line must not be emitted");

    append(&path, "ld\n");
    let items = collect_stream_items(&mut stream, 1, Duration::from_secs(2)).await;
    assert_eq!(texts(items), vec!["world"]);

    File::create(&path).unwrap();
    append(&path, "new\n");
    let items = collect_stream_items(&mut stream, 1, Duration::from_secs(2)).await;
    assert_eq!(texts(items), vec!["new"]);
}

#[tokio::test]
async fn test_watch_nonexistent_directory_is_quiet() {
    let mut stream = watch_log(
        "/definitely/nonexistent/dir/file_12345.log",
        WatchConfig::default().with_interval(Duration::from_millis(10)),
    )
    .await
    .unwrap();

    let items = collect_stream_items(&mut stream, 1, Duration::from_millis(100)).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_poller_scenario_offsets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    File::create(&path).unwrap();
    let poller = FilePoller::new(&path);

    let mut emitted = Vec::new();
    let steps: [(&str, &[&str], u64); 4] = [
        ("", &[], 0),
        ("hello\n", &["hello"], 6),
        ("wor", &[], 6),
        ("ld\n", &["world"], 12),
    ];

    for (content, expected, offset) in steps {
        append(&path, content);
        emitted.clear();
        poller.poll(|line| emitted.push(line.text)).await.unwrap();
        assert_eq!(emitted, expected);
        assert_eq!(poller.last_offset().await, offset);
    }
}
