use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use kokoro_core::types::{Role, Turn};
use kokoro_core::{KokoroError, Result};

use crate::formats::{ChatRecord, InstructRecord, ShareGptRecord};

pub const SHAREGPT_FILE: &str = "train_sharegpt.jsonl";
pub const CHAT_FILE: &str = "train_openai.jsonl";
pub const INSTRUCT_FILE: &str = "train_alpaca.jsonl";

/// Appends every successful exchange to three line-delimited logs.
///
/// No deduplication, no rewriting of prior lines. Writes across concurrent
/// requests are not synchronized; each line is a single write call, so lines
/// may interleave between requests but never within one.
pub struct TrainingExporter {
    sharegpt: PathBuf,
    chat: PathBuf,
    instruct: PathBuf,
}

impl TrainingExporter {
    /// Open the exporter, creating the data directory and empty log files
    /// on first use.
    pub fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .map_err(|e| KokoroError::Storage(format!("create {}: {e}", data_dir.display())))?;
        let exporter = Self {
            sharegpt: data_dir.join(SHAREGPT_FILE),
            chat: data_dir.join(CHAT_FILE),
            instruct: data_dir.join(INSTRUCT_FILE),
        };
        for path in [&exporter.sharegpt, &exporter.chat, &exporter.instruct] {
            if !path.exists() {
                fs::write(path, "")
                    .map_err(|e| KokoroError::Storage(format!("init {}: {e}", path.display())))?;
            }
        }
        Ok(exporter)
    }

    fn append_line<T: Serialize>(path: &Path, record: &T) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|e| KokoroError::Storage(format!("open {}: {e}", path.display())))?;
        // One write call per line keeps each line atomic.
        file.write_all(line.as_bytes())
            .map_err(|e| KokoroError::Storage(format!("append {}: {e}", path.display())))?;
        Ok(())
    }

    /// Append one exchange to all three logs. `reply` is the clean assistant
    /// text, emotion tag already stripped.
    pub fn append_exchange(&self, system_prompt: &str, history: &[Turn], reply: &str) -> Result<()> {
        let mut full_history = history.to_vec();
        full_history.push(Turn::new(Role::Assistant, reply));

        Self::append_line(&self.sharegpt, &ShareGptRecord::build(system_prompt, &full_history))?;
        Self::append_line(&self.chat, &ChatRecord::build(system_prompt, &full_history))?;
        Self::append_line(&self.instruct, &InstructRecord::build(system_prompt, history, reply))?;

        tracing::debug!(turns = full_history.len(), "exchange appended to training logs");
        Ok(())
    }

    /// Training pair count: non-blank lines of the ShareGPT log. Zero on
    /// any IO failure.
    pub fn training_pairs(&self) -> usize {
        fs::read_to_string(&self.sharegpt)
            .map(|raw| raw.lines().filter(|l| !l.trim().is_empty()).count())
            .unwrap_or(0)
    }

    /// Combined size of the three logs in kilobytes, one decimal place.
    pub fn total_size_kb(&self) -> String {
        let bytes: u64 = [&self.sharegpt, &self.chat, &self.instruct]
            .iter()
            .filter_map(|p| fs::metadata(p).ok())
            .map(|m| m.len())
            .sum();
        format!("{:.1}", bytes as f64 / 1024.0)
    }
}
