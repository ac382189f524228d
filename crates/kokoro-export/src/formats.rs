//! One record type per export encoding.

use serde::{Deserialize, Serialize};

use kokoro_core::types::{Role, Turn};

/// ShareGPT-style conversation (Axolotl, LLaMA-Factory, Unsloth).
#[derive(Debug, Serialize, Deserialize)]
pub struct ShareGptRecord {
    pub conversations: Vec<ShareGptTurn>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShareGptTurn {
    pub from: String,
    pub value: String,
}

impl ShareGptRecord {
    pub fn build(system_prompt: &str, history: &[Turn]) -> Self {
        let mut conversations = vec![ShareGptTurn {
            from: "system".into(),
            value: system_prompt.to_string(),
        }];
        conversations.extend(history.iter().map(|t| ShareGptTurn {
            from: match t.role {
                Role::User => "human".into(),
                Role::Assistant => "gpt".into(),
            },
            value: t.content.clone(),
        }));
        Self { conversations }
    }
}

/// Chat-message encoding (OpenAI fine-tuning API).
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRecord {
    pub messages: Vec<ChatTurn>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

impl ChatRecord {
    pub fn build(system_prompt: &str, history: &[Turn]) -> Self {
        let mut messages = vec![ChatTurn {
            role: "system".into(),
            content: system_prompt.to_string(),
        }];
        messages.extend(history.iter().map(|t| ChatTurn {
            role: t.role.to_string(),
            content: t.content.clone(),
        }));
        Self { messages }
    }
}

/// Instruction/input/output triple (plain instruction tuning).
#[derive(Debug, Serialize, Deserialize)]
pub struct InstructRecord {
    pub instruction: String,
    pub input: String,
    pub output: String,
}

impl InstructRecord {
    /// `input` is the most recent user turn of the pre-reply history.
    pub fn build(system_prompt: &str, history: &[Turn], reply: &str) -> Self {
        let input = history
            .iter()
            .rev()
            .find(|t| t.role == Role::User)
            .map(|t| t.content.clone())
            .unwrap_or_default();
        Self {
            instruction: system_prompt.to_string(),
            input,
            output: reply.to_string(),
        }
    }
}
