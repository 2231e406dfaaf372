//! Tests for output writers (JSON, JSONL, CSV)

use chatstats::MessageRow;
use chatstats::core::output::{write_csv, write_json, write_jsonl, write_replies_csv};
use chatstats::core::{MessageTable, OutputConfig, ReplyRecord};
use chatstats::format::{OutputFormat, write_replies_to_format, write_to_format};
use serde_json::{Value, json};
use std::fs;
use tempfile::tempdir;

fn sample_table() -> MessageTable {
    MessageTable::from_rows(vec![
        MessageRow::new("U1", "Hello!", "1705314600.000100")
            .with_msg_id("m1")
            .with_annotations(vec!["U2".into()], vec!["wave".into()], vec!["https://example.com".into()])
            .with_replies(json!([{"user": "U2", "ts": "1705314700.000200"}])),
        MessageRow::new("U2", "Hi; \"you\"\nthere", "1705314700.000200")
            .with_msg_id("m2")
            .as_reply(),
        MessageRow::new("U3", "Привет 🎉", "1705314800.000300")
            .with_reactions(json!([{"name": "tada", "users": ["U1"], "count": 1}])),
    ])
}

fn sample_replies() -> Vec<ReplyRecord> {
    vec![ReplyRecord::new(
        "1705314600.000100",
        "m1",
        json!({"user": "U2", "ts": "1705314700.000200"}).as_object().unwrap().clone(),
    )]
}

// ============================================================================
// JSON Writer Tests
// ============================================================================

mod json_writer_tests {
    use super::*;

    #[test]
    fn test_write_json_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.json");

        write_json(sample_table().rows(), &path).unwrap();

        let parsed: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["links"], json!(["https://example.com"]));
        assert_eq!(rows[1]["replies_to"], "1705314700.000200");
        assert!(rows[1]["links"].is_null());
        assert_eq!(rows[2]["text"], "Привет 🎉");
    }

    #[test]
    fn test_write_json_round_trips_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.json");
        let table = sample_table();

        write_json(table.rows(), &path).unwrap();

        let back: Vec<MessageRow> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, table.into_rows());
    }

    #[test]
    fn test_write_json_pretty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.json");

        write_json(sample_table().rows(), &path).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("\n  {"));
    }
}

// ============================================================================
// JSONL Writer Tests
// ============================================================================

mod jsonl_writer_tests {
    use super::*;

    #[test]
    fn test_write_jsonl_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.jsonl");

        write_jsonl(sample_table().rows(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        let second: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["text"], "Hi; \"you\"\nthere");
    }

    #[test]
    fn test_write_jsonl_replies() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("replies.jsonl");

        write_jsonl(&sample_replies(), &path).unwrap();

        let line: Value = serde_json::from_str(fs::read_to_string(&path).unwrap().trim_end()).unwrap();
        assert_eq!(line["message_id"], "m1");
        assert_eq!(line["user"], "U2");
    }
}

// ============================================================================
// CSV Writer Tests
// ============================================================================

mod csv_writer_tests {
    use super::*;

    #[test]
    fn test_write_csv_parses_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.csv");

        write_csv(&sample_table(), &path, &OutputConfig::new()).unwrap();

        let mut reader = csv::ReaderBuilder::new().delimiter(b';').from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), MessageRow::COLUMNS.to_vec());

        let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(records.len(), 3);
        assert_eq!(&records[1][1], "Hi; \"you\"\nthere");
        assert_eq!(&records[1][8], "1705314700.000200");
        assert_eq!(&records[0][11], "1");

        let replies: Value = serde_json::from_str(&records[0][7]).unwrap();
        assert_eq!(replies[0]["user"], "U2");

        let reactions: Value = serde_json::from_str(&records[2][6]).unwrap();
        assert_eq!(reactions[0]["name"], "tada");
        assert_eq!(&records[2][4], "");
    }

    #[test]
    fn test_write_replies_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("replies.csv");

        write_replies_csv(&sample_replies(), &path, &OutputConfig::new()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "thread_ts;message_id;ts;user\n1705314600.000100;m1;1705314700.000200;U2\n");
    }
}

// ============================================================================
// Format Dispatch Tests
// ============================================================================

mod format_dispatch_tests {
    use super::*;

    #[test]
    fn test_write_to_format_all_formats() {
        let dir = tempdir().unwrap();
        let table = sample_table();

        for format in [OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl] {
            let path = dir.path().join(format!("out.{}", format.extension()));
            write_to_format(&table, &path, format, &OutputConfig::new()).unwrap();
            assert!(path.exists());
            assert_eq!(OutputFormat::from_path(&path).unwrap(), format);
        }
    }

    #[test]
    fn test_write_replies_to_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("replies.json");

        write_replies_to_format(&sample_replies(), &path, OutputFormat::Json, &OutputConfig::new()).unwrap();

        let parsed: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed[0]["thread_ts"], "1705314600.000100");
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");

        let err = write_to_format(&sample_table(), &path, OutputFormat::Csv, &OutputConfig::new()).unwrap_err();
        assert!(err.is_io());
    }
}
