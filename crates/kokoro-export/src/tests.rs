use crate::exporter::{TrainingExporter, CHAT_FILE, INSTRUCT_FILE, SHAREGPT_FILE};
use crate::formats::{ChatRecord, InstructRecord, ShareGptRecord};
use kokoro_core::types::{Role, Turn};
use serde_json::Value;
use tempfile::TempDir;

fn history() -> Vec<Turn> {
    vec![
        Turn::new(Role::User, "hello"),
        Turn::new(Role::Assistant, "hi!"),
        Turn::new(Role::User, "tell me a story"),
    ]
}

fn read_lines(dir: &TempDir, file: &str) -> Vec<Value> {
    std::fs::read_to_string(dir.path().join(file))
        .unwrap()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

// ========== Record builders ==========

#[test]
fn test_sharegpt_record_roles() {
    let mut h = history();
    h.push(Turn::new(Role::Assistant, "once upon a time"));
    let record = ShareGptRecord::build("prompt", &h);
    let froms: Vec<&str> = record.conversations.iter().map(|t| t.from.as_str()).collect();
    assert_eq!(froms, ["system", "human", "gpt", "human", "gpt"]);
    assert_eq!(record.conversations[0].value, "prompt");
    assert_eq!(record.conversations[4].value, "once upon a time");
}

#[test]
fn test_chat_record_roles() {
    let record = ChatRecord::build("prompt", &history());
    let roles: Vec<&str> = record.messages.iter().map(|t| t.role.as_str()).collect();
    assert_eq!(roles, ["system", "user", "assistant", "user"]);
}

#[test]
fn test_instruct_record_uses_last_user_turn() {
    let record = InstructRecord::build("prompt", &history(), "a story");
    assert_eq!(record.instruction, "prompt");
    assert_eq!(record.input, "tell me a story");
    assert_eq!(record.output, "a story");
}

#[test]
fn test_instruct_record_no_user_turn() {
    let record = InstructRecord::build("prompt", &[], "reply");
    assert_eq!(record.input, "");
}

// ========== Exporter ==========

#[test]
fn test_open_creates_files() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("data");
    TrainingExporter::open(&dir).unwrap();
    for file in [SHAREGPT_FILE, CHAT_FILE, INSTRUCT_FILE] {
        assert!(dir.join(file).exists());
    }
}

#[test]
fn test_append_exchange_one_line_each() {
    let tmp = TempDir::new().unwrap();
    let exporter = TrainingExporter::open(tmp.path()).unwrap();
    exporter.append_exchange("persona", &history(), "a story").unwrap();

    for file in [SHAREGPT_FILE, CHAT_FILE, INSTRUCT_FILE] {
        assert_eq!(read_lines(&tmp, file).len(), 1, "{file}");
    }

    let sharegpt = &read_lines(&tmp, SHAREGPT_FILE)[0];
    assert_eq!(sharegpt["conversations"][0]["from"], "system");
    // History plus the appended reply.
    assert_eq!(sharegpt["conversations"].as_array().unwrap().len(), 5);
    assert_eq!(sharegpt["conversations"][4]["value"], "a story");

    let chat = &read_lines(&tmp, CHAT_FILE)[0];
    assert_eq!(chat["messages"][0]["role"], "system");
    assert_eq!(chat["messages"][4]["content"], "a story");

    let instruct = &read_lines(&tmp, INSTRUCT_FILE)[0];
    assert_eq!(instruct["instruction"], "persona");
    assert_eq!(instruct["input"], "tell me a story");
    assert_eq!(instruct["output"], "a story");
}

#[test]
fn test_appends_accumulate_in_order() {
    let tmp = TempDir::new().unwrap();
    let exporter = TrainingExporter::open(tmp.path()).unwrap();
    for i in 0..3 {
        let h = vec![Turn::new(Role::User, format!("q{i}"))];
        exporter.append_exchange("p", &h, &format!("a{i}")).unwrap();
    }
    let lines = read_lines(&tmp, INSTRUCT_FILE);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["input"], "q0");
    assert_eq!(lines[2]["output"], "a2");
}

#[test]
fn test_reopen_does_not_truncate() {
    let tmp = TempDir::new().unwrap();
    let exporter = TrainingExporter::open(tmp.path()).unwrap();
    exporter.append_exchange("p", &history(), "r").unwrap();
    drop(exporter);
    let exporter = TrainingExporter::open(tmp.path()).unwrap();
    assert_eq!(exporter.training_pairs(), 1);
    exporter.append_exchange("p", &history(), "r2").unwrap();
    assert_eq!(exporter.training_pairs(), 2);
}

#[test]
fn test_training_pairs_counts_sharegpt_lines() {
    let tmp = TempDir::new().unwrap();
    let exporter = TrainingExporter::open(tmp.path()).unwrap();
    assert_eq!(exporter.training_pairs(), 0);
    exporter.append_exchange("p", &history(), "r").unwrap();
    assert_eq!(exporter.training_pairs(), 1);
}

#[test]
fn test_total_size_kb_format() {
    let tmp = TempDir::new().unwrap();
    let exporter = TrainingExporter::open(tmp.path()).unwrap();
    assert_eq!(exporter.total_size_kb(), "0.0");
    exporter.append_exchange("p", &history(), "r").unwrap();
    let kb: f64 = exporter.total_size_kb().parse().unwrap();
    assert!(kb > 0.0);
}

#[test]
fn test_stats_degrade_when_files_missing() {
    let tmp = TempDir::new().unwrap();
    let exporter = TrainingExporter::open(tmp.path()).unwrap();
    for file in [SHAREGPT_FILE, CHAT_FILE, INSTRUCT_FILE] {
        std::fs::remove_file(tmp.path().join(file)).unwrap();
    }
    assert_eq!(exporter.training_pairs(), 0);
    assert_eq!(exporter.total_size_kb(), "0.0");
}

#[test]
fn test_thai_content_preserved() {
    let tmp = TempDir::new().unwrap();
    let exporter = TrainingExporter::open(tmp.path()).unwrap();
    let h = vec![Turn::new(Role::User, "สวัสดี")];
    exporter.append_exchange("p", &h, "สวัสดีค่ะ").unwrap();
    let line = &read_lines(&tmp, INSTRUCT_FILE)[0];
    assert_eq!(line["input"], "สวัสดี");
    assert_eq!(line["output"], "สวัสดีค่ะ");
}
