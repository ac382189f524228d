use kokoro_client::CompletionClient;
use kokoro_core::emotion::parse_tagged_reply;
use kokoro_core::types::{Emotion, Message, Role, Turn};
use kokoro_core::{KokoroError, Result};
use kokoro_store::kv::KvStore;
use kokoro_store::store::SessionStore;

/// Send-path state. One send in flight per controller, no queuing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SendState {
    Idle,
    Sending,
}

/// What a completed send left behind.
#[derive(Debug)]
pub enum SendResult {
    /// The assistant replied; the message was persisted and shown.
    Replied(Message),
    /// The send failed; the message is the view-only error entry. The
    /// failed attempt is not retried automatically.
    Failed(Message),
}

/// Orchestrates one chat view: appends the user message, invokes the
/// completion client, parses the emotion tag, persists the reply.
///
/// Owns its state explicitly; lifecycle is tied to one view instance, not
/// the process.
pub struct ChatController<K: KvStore> {
    store: SessionStore<K>,
    client: CompletionClient,
    state: SendState,
    view: Vec<Message>,
}

impl<K: KvStore> ChatController<K> {
    pub fn new(store: SessionStore<K>, client: CompletionClient) -> Self {
        let mut controller = Self {
            store,
            client,
            state: SendState::Idle,
            view: Vec::new(),
        };
        // Restore the previously active session into the view, if it still
        // exists.
        if let Some(id) = controller.store.active_session() {
            if !controller.switch_session(&id) {
                controller.store.clear_active_session();
            }
        }
        controller
    }

    /// The rendered transcript: persisted messages plus any view-only
    /// error entries.
    pub fn view(&self) -> &[Message] {
        &self.view
    }

    pub fn is_idle(&self) -> bool {
        self.state == SendState::Idle
    }

    pub fn active_session_id(&self) -> Option<String> {
        self.store.active_session()
    }

    pub fn store(&self) -> &SessionStore<K> {
        &self.store
    }

    /// Clear the active pointer and the view; the next send starts fresh.
    pub fn new_chat(&mut self) {
        self.store.clear_active_session();
        self.view.clear();
    }

    /// Make another session active and load its messages into the view.
    /// Returns false (leaving everything untouched) for an unknown id.
    pub fn switch_session(&mut self, id: &str) -> bool {
        let Some(session) = self.store.get_session(id) else {
            return false;
        };
        self.store.set_active_session(id);
        self.view = session.messages;
        true
    }

    /// One send: `Idle -> Sending -> (Success | Failed) -> Idle`.
    ///
    /// Blank input and an in-flight send are rejected before any side
    /// effect. Failures after that point are converted into a view-only
    /// assistant message, never an error.
    pub async fn send(&mut self, text: &str) -> Result<SendResult> {
        let text = text.trim();
        if text.is_empty() {
            return Err(KokoroError::Validation("message is empty".into()));
        }
        if self.state == SendState::Sending {
            return Err(KokoroError::Validation("a send is already in flight".into()));
        }

        self.state = SendState::Sending;
        let result = self.send_inner(text).await;
        // Back to Idle unconditionally, re-enabling send.
        self.state = SendState::Idle;
        Ok(result)
    }

    async fn send_inner(&mut self, text: &str) -> SendResult {
        let session_id = self.ensure_active_session();

        // Optimistic append: the user message lands before the network
        // call resolves.
        self.store.append_message(&session_id, Role::User, text, None);
        self.view.push(Message::new(Role::User, text, None));

        let history: Vec<Turn> = self
            .store
            .get_session(&session_id)
            .map(|s| s.messages.iter().map(Turn::from).collect())
            .unwrap_or_default();
        let identity = self.store.identity();

        match self.client.complete(&history, &identity.system_prompt).await {
            Ok(raw) => {
                let (emotion, clean) = parse_tagged_reply(&raw);
                self.store
                    .append_message(&session_id, Role::Assistant, &clean, Some(emotion));
                let msg = Message::new(Role::Assistant, clean, Some(emotion));
                self.view.push(msg.clone());
                SendResult::Replied(msg)
            }
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "send failed");
                let msg = Message::new(Role::Assistant, format!("⚠️ {e}"), Some(Emotion::Sad));
                self.view.push(msg.clone());
                SendResult::Failed(msg)
            }
        }
    }

    fn ensure_active_session(&mut self) -> String {
        let existing = self
            .store
            .active_session()
            .filter(|id| self.store.get_session(id).is_some());
        match existing {
            Some(id) => id,
            None => {
                let id = self.store.create_session();
                self.store.set_active_session(&id);
                self.view.clear();
                id
            }
        }
    }
}
