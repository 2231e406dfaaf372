//! Integration tests for reading channel directories end to end.

use chatstats::core::stats::{SummaryMetric, mean_by_user};
use chatstats::prelude::*;
use chatstats::time::format_unix_ts;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

fn write_file(dir: &Path, name: &str, content: &serde_json::Value) {
    fs::write(dir.join(name), serde_json::to_string_pretty(content).unwrap()).unwrap();
}

/// A channel with three days of traffic and a stray non-export file.
fn channel() -> TempDir {
    let dir = tempdir().unwrap();

    write_file(
        dir.path(),
        "2024-01-16.json",
        &json!([
            {"client_msg_id": "c1", "type": "message", "text": "second day", "user": "U2",
             "ts": "1705410000.000100", "team": "T1"},
            {"type": "message", "subtype": "bot_message", "bot_id": "B1", "text": "beep",
             "ts": "1705410001.000000"}
        ]),
    );
    write_file(
        dir.path(),
        "2024-01-15.json",
        &json!([
            {"client_msg_id": "a1", "type": "message", "text": "kickoff <@U2>", "user": "U1",
             "ts": "1705314600.000100", "team": "T1", "thread_ts": "1705314600.000100",
             "reply_count": 2, "reply_users_count": 2, "reply_users": ["U2", "U3"],
             "replies": [{"user": "U2", "ts": "1705314700.000000"}, {"user": "U3", "ts": "1705314800.000000"}],
             "reactions": [{"name": "tada", "users": ["U2"], "count": 1}],
             "blocks": [{"type": "rich_text", "elements": [{"type": "rich_text_section", "elements": [
                 {"type": "text", "text": "kickoff "},
                 {"type": "user", "user_id": "U2"}
             ]}]}]},
            {"client_msg_id": "a2", "type": "message", "text": "on it", "user": "U2",
             "ts": "1705314700.000000", "team": "T1", "thread_ts": "1705314600.000100",
             "parent_user_id": "U1"},
            {"client_msg_id": "a3", "type": "message", "text": "links", "user": "U3",
             "ts": "1705314800.000000", "team": "T1", "thread_ts": "1705314600.000100",
             "parent_user_id": "U1",
             "blocks": [{"type": "rich_text", "elements": [{"type": "rich_text_section", "elements": [
                 {"type": "link", "url": "https://a.example"},
                 {"type": "link", "url": "https://b.example"},
                 {"type": "emoji", "name": "eyes"}
             ]}]}]}
        ]),
    );
    write_file(
        dir.path(),
        "2024-01-17.json",
        &json!([
            {"type": "message", "subtype": "channel_join", "user": "U4", "text": "<@U4> joined",
             "ts": "1705500000.000000"}
        ]),
    );
    fs::write(dir.path().join("notes.txt"), "scratch").unwrap();
    dir
}

fn json_only() -> ChannelConfig {
    ChannelConfig::new().with_extension("json")
}

#[test]
fn test_read_channel_in_file_name_order() {
    let dir = channel();
    let table = read_channel_with_config(dir.path(), &json_only()).unwrap();

    let ids: Vec<_> = table.iter().map(|r| r.msg_id.as_deref().unwrap()).collect();
    assert_eq!(ids, vec!["a1", "a2", "a3", "c1"]);
}

#[test]
fn test_read_channel_rejects_non_export_file() {
    let dir = channel();
    let err = read_channel(dir.path()).unwrap_err();
    assert!(err.is_parse());
    assert!(err.to_string().contains("notes.txt"));
}

#[test]
fn test_row_columns() {
    let dir = channel();
    let table = read_channel_with_config(dir.path(), &json_only()).unwrap();
    let rows = table.rows();

    let root = &rows[0];
    assert!(root.is_thread_root());
    assert!(!root.is_reply());
    assert_eq!(root.mentions.as_deref(), Some(&["U2".to_string()][..]));
    assert_eq!(root.reactions.as_ref().unwrap()[0]["name"], "tada");
    assert_eq!(root.link_count, 0);

    let reply = &rows[2];
    assert_eq!(reply.replies_to.as_deref(), Some("1705314800.000000"));
    assert!(reply.replies.is_none());
    assert_eq!(reply.link_count, 2);
    assert_eq!(reply.emojis.as_deref(), Some(&["eyes".to_string()][..]));

    let plain = &rows[3];
    assert!(!plain.has_annotations());
    assert!(plain.reactions.is_none());
}

#[test]
fn test_channel_reader_load_then_replies() {
    let dir = channel();
    let reader = ChannelReader::with_config(json_only());
    let batches = reader.load(dir.path()).unwrap();
    assert_eq!(batches.len(), 3);
    assert!(batches[0].path.ends_with("2024-01-15.json"));

    let replies: Vec<_> = batches.iter().flat_map(|b| extract_replies(&b.messages)).collect();
    assert_eq!(replies.len(), 2);
    assert!(replies.iter().all(|r| r.thread_ts == "1705314600.000100" && r.message_id == "a1"));
    assert_eq!(replies[1].user(), Some("U3"));

    let table = reader.extract_batches(&batches).unwrap();
    assert_eq!(table.len(), 4);
}

#[test]
fn test_stats_over_channel() {
    let dir = channel();
    let table = read_channel_with_config(dir.path(), &json_only()).unwrap();
    let stats = ActivityStats::from_table(&table);

    assert_eq!(stats.total_messages(), 4);
    assert_eq!(top_n(&stats.messages, 1), vec![("U2".to_string(), 2)]);
    assert_eq!(stats.replies.get("U3"), Some(&1));
    assert_eq!(stats.mentions.get("U2"), Some(&1));
    assert_eq!(top_n(&stats.links, 1), vec![("U3".to_string(), 2)]);

    assert_eq!(tagged_users(table.texts()), vec!["@U2"]);
}

#[test]
fn test_thread_summaries_over_channel() {
    let dir = channel();
    let reader = ChannelReader::with_config(json_only());
    let raw: Vec<RawMessage> = reader
        .load(dir.path())
        .unwrap()
        .into_iter()
        .flat_map(|b| b.messages)
        .collect();

    let (summaries, replies) = summarize_threads(&raw).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].client_msg_id, "a1");
    assert_eq!(replies.len(), 2);

    let means = mean_by_user(&summaries, SummaryMetric::ReplyUsersCount);
    assert_eq!(means, vec![("U1".to_string(), 2.0)]);
}

#[test]
fn test_filters_and_users_over_channel() {
    let dir = channel();
    let table = read_channel_with_config(dir.path(), &json_only()).unwrap();

    let config = FilterConfig::new().with_date_from("2024-01-16").unwrap();
    let later = apply_filters(table.clone(), &config);
    assert_eq!(later.texts().collect::<Vec<_>>(), vec!["second day"]);

    let users_path = dir.path().join("users.list");
    fs::write(
        &users_path,
        r#"{"profile": [{"id": "U2", "real_name": "Grace"}, {"id": "U3", "real_name": "Linus"}]}"#,
    )
    .unwrap();
    let users = UserDirectory::from_path(&users_path).unwrap();
    let named = users.map_counts(&ActivityStats::from_table(&table).messages);
    assert_eq!(named[0], ("Grace".to_string(), 2));
    assert!(named.contains(&("U1".to_string(), 1)));
}

#[test]
fn test_timestamp_formatting_of_rows() {
    let dir = channel();
    let table = read_channel_with_config(dir.path(), &json_only()).unwrap();
    let first = table.timestamps().next().unwrap();
    assert_eq!(format_unix_ts(first).unwrap(), "2024-01-15 10:30:00");
}

#[test]
fn test_missing_directory_is_io_error() {
    let err = read_channel(Path::new("/no/such/channel")).unwrap_err();
    assert!(err.is_io());
}

#[test]
fn test_incomplete_message_in_file() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "2024-02-01.json",
        &json!([
            {"text": "ok", "user": "U1", "ts": "1706745600.000000"},
            {"user": "U1", "ts": "1706745601.000000"}
        ]),
    );

    let err = read_channel(dir.path()).unwrap_err();
    assert!(err.is_missing_field());
    let message = err.to_string();
    assert!(message.contains("Message #1"));
    assert!(message.contains("'text'"));
    assert!(message.contains("2024-02-01.json"));

    let lenient = ChannelConfig::new().with_extract(ExtractConfig::lenient());
    let table = read_channel_with_config(dir.path(), &lenient).unwrap();
    assert_eq!(table.len(), 1);
}

#[test]
fn test_empty_file_and_empty_array() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.json"), "[]").unwrap();
    assert!(read_channel(dir.path()).unwrap().is_empty());

    fs::write(dir.path().join("b.json"), "").unwrap();
    assert!(read_channel(dir.path()).unwrap_err().is_parse());
}
