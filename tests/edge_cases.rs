//! Edge case tests for chatstats
//!
//! Odd-but-real export shapes that cut across parsing, extraction and
//! output.

use chatstats::ChatstatsError;
use chatstats::config::ExtractConfig;
use chatstats::core::output::{to_csv, to_json};
use chatstats::core::{OutputConfig, summarize_message};
use chatstats::extractor::{extract, extract_replies, extract_with_config};
use chatstats::parsing::parse_batch_str;
use chatstats::time::convert_timestamps;

// =========================================================================
// Presence semantics
// =========================================================================

#[test]
fn test_null_subtype_still_skips() {
    let batch = parse_batch_str(r#"[{"subtype": null, "text": "x", "user": "U1", "ts": "1"}]"#).unwrap();
    assert!(extract(&batch).unwrap().is_empty());
}

#[test]
fn test_null_parent_user_id_still_marks_reply() {
    let batch = parse_batch_str(r#"[{"parent_user_id": null, "text": "x", "user": "U1", "ts": "7"}]"#).unwrap();
    let table = extract(&batch).unwrap();
    assert_eq!(table.rows()[0].replies_to.as_deref(), Some("7"));
}

#[test]
fn test_null_reactions_and_replies_are_absent() {
    let batch = parse_batch_str(
        r#"[{"text": "x", "user": "U1", "ts": "1", "reactions": null,
             "thread_ts": "1", "reply_users": [], "replies": null}]"#,
    )
    .unwrap();
    let row = extract(&batch).unwrap().into_rows().remove(0);
    assert!(row.reactions.is_none());
    assert!(row.replies.is_none());
    assert!(extract_replies(&batch).is_empty());
}

#[test]
fn test_null_text_still_gives_a_row() {
    let batch = parse_batch_str(r#"[{"text": null, "user": "U1", "ts": "1"}]"#).unwrap();
    let table = extract(&batch).unwrap();
    assert_eq!(table.len(), 1);
    assert!(table.rows()[0].text.is_none());

    let json = to_json(table.rows()).unwrap();
    assert!(json.contains(r#""text": null"#));
    let csv = to_csv(&table, &OutputConfig::new()).unwrap();
    assert!(csv.lines().nth(1).unwrap().starts_with(";;;U1;"));
}

#[test]
fn test_absent_text_is_missing() {
    let batch = parse_batch_str(r#"[{"user": "U1", "ts": "1"}]"#).unwrap();
    let err = extract(&batch).unwrap_err();
    assert!(matches!(err, ChatstatsError::MissingField { field: "text", index: 0, .. }));
}

#[test]
fn test_odd_field_types_do_not_lose_the_batch() {
    let batch = parse_batch_str(
        r#"[{"subtype": "bot_message", "ts": "1", "text": "x", "team": 7},
            {"subtype": "thread_broadcast", "ts": "2", "reply_count": "many", "reply_users_count": -1},
            {"text": "hi", "user": "U1", "ts": "3", "team": ["T1"], "type": 1}]"#,
    )
    .unwrap();
    let table = extract(&batch).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0].text(), Some("hi"));
}

// =========================================================================
// Blocks
// =========================================================================

#[test]
fn test_incomplete_leaf_fails_unless_skipping() {
    let batch = parse_batch_str(
        r#"[{"text": "x", "user": "U1", "ts": "1",
             "blocks": [{"elements": [{"elements": [{"type": "link"}]}]}]}]"#,
    )
    .unwrap();

    let err = extract(&batch).unwrap_err();
    assert!(matches!(err, ChatstatsError::MissingField { field: "url", .. }));

    // a broken leaf counts as a missing field of its message
    let table = extract_with_config(&batch, &ExtractConfig::lenient()).unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_incomplete_leaf_in_subtype_message_is_ignored() {
    let batch = parse_batch_str(
        r#"[{"subtype": "bot_message", "blocks": [{"elements": [{"elements": [{"type": "emoji"}]}]}]}]"#,
    )
    .unwrap();
    assert!(extract(&batch).unwrap().is_empty());
}

#[test]
fn test_junk_inside_blocks_is_tolerated() {
    let batch = parse_batch_str(
        r#"[{"text": "x", "user": "U1", "ts": "1",
             "blocks": [42, "str", {"elements": "nope"}, {"elements": [null, {"elements": [7, {"type": 3}]}]}]}]"#,
    )
    .unwrap();
    let row = extract(&batch).unwrap().into_rows().remove(0);
    assert_eq!(row.link_count, 0);
    assert_eq!(row.mentions, Some(vec![]));
}

#[test]
fn test_duplicate_annotations_are_kept() {
    let batch = parse_batch_str(
        r#"[{"text": "x", "user": "U1", "ts": "1", "blocks": [{"elements": [{"elements": [
            {"type": "link", "url": "https://a"}, {"type": "link", "url": "https://a"}
        ]}]}]}]"#,
    )
    .unwrap();
    let row = extract(&batch).unwrap().into_rows().remove(0);
    assert_eq!(row.link_count, 2);
}

// =========================================================================
// Replies
// =========================================================================

#[test]
fn test_non_string_thread_ts_yields_no_replies() {
    let batch = parse_batch_str(
        r#"[{"client_msg_id": "m", "text": "x", "user": "U1", "ts": "1",
             "thread_ts": 1, "reply_users": ["U2"], "replies": [{"user": "U2", "ts": "2"}]}]"#,
    )
    .unwrap();
    assert!(extract_replies(&batch).is_empty());
    assert_eq!(extract(&batch).unwrap().len(), 1);
}

#[test]
fn test_summary_requires_every_column() {
    let batch = parse_batch_str(
        r#"[{"client_msg_id": "m", "type": "message", "text": "x", "user": "U1", "ts": "1",
             "team": "T", "thread_ts": "1", "reply_users": [], "reply_count": 0}]"#,
    )
    .unwrap();
    let err = summarize_message(&batch[0], 0).unwrap_err();
    assert!(matches!(err, ChatstatsError::MissingField { field: "reply_users_count", .. }));
}

// =========================================================================
// Unicode and special characters
// =========================================================================

#[test]
fn test_unicode_survives_all_writers() {
    let batch = parse_batch_str(
        r#"[{"text": "Привет 你好 مرحبا 🌍", "user": "U1", "ts": "1"},
            {"text": "a;b\"c\nd", "user": "U2", "ts": "2"}]"#,
    )
    .unwrap();
    let table = extract(&batch).unwrap();

    let json = to_json(table.rows()).unwrap();
    assert!(json.contains("Привет 你好 مرحبا 🌍"));

    let csv = to_csv(&table, &OutputConfig::new()).unwrap();
    assert!(csv.contains("Привет 你好 مرحبا 🌍"));
    assert!(csv.contains("\"a;b\"\"c\nd\""));
}

// =========================================================================
// Timestamps
// =========================================================================

#[test]
fn test_convert_timestamps_stops_at_bad_value() {
    let converted = convert_timestamps(["0", "1705314600.5"]).unwrap();
    assert_eq!(converted, vec!["0", "2024-01-15 10:30:00"]);

    let err = convert_timestamps(["1", "yesterday"]).unwrap_err();
    assert!(err.to_string().contains("yesterday"));
}
