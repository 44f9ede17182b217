use super::storage::SessionRepository;
use super::text::{derive_title, normalize_input};
use super::transport::DispatchTransport;
use super::new_session_id;
use crate::catalog;
use crate::dispatcher::{DispatchReply, DispatchRequest};
use crate::error::{Result, USER_FACING_FAILURE};
use crate::models::{ChatSession, Message, Selector};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Uninitialized,
    Resolving,
    Ready,
    Awaiting,
}

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Empty input, or a request was already in flight.
    Ignored,
    Replied,
    Failed,
    /// The reply arrived after the view moved to another session.
    Discarded,
}

/// A request that has left the view but whose reply has not been applied.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    pub session_id: String,
    pub request: DispatchRequest,
}

/// State of one mounted conversation view.
pub struct ChatView {
    repository: Arc<dyn SessionRepository>,
    selector: Selector,
    state: ViewState,
    session_id: Option<String>,
    created_at: DateTime<Utc>,
    messages: Vec<Message>,
    title: String,
    error: Option<String>,
}

impl ChatView {
    pub fn new(repository: Arc<dyn SessionRepository>, selector: Selector) -> Self {
        let title = catalog::default_title(&selector);
        Self {
            repository,
            selector,
            state: ViewState::Uninitialized,
            session_id: None,
            created_at: Utc::now(),
            messages: Vec::new(),
            title,
            error: None,
        }
    }

    /// Resolve the active session: resume `session_id` when it exists in the
    /// collection, otherwise start a fresh session with a greeting. Fails with
    /// the store's error when the collection cannot be read.
    pub fn mount(&mut self, session_id: Option<&str>) -> Result<()> {
        self.state = ViewState::Resolving;
        self.error = None;

        // Read the collection even for a new session: a corrupt store must
        // fail the mount, not every later save.
        let sessions = match self.repository.list() {
            Ok(sessions) => sessions,
            Err(e) => {
                self.state = ViewState::Uninitialized;
                return Err(e);
            }
        };
        let existing = session_id.and_then(|id| sessions.into_iter().find(|s| s.id == id));

        match existing {
            Some(session) => {
                info!(session = %session.id, messages = session.messages.len(), "Resumed session");
                if let Some(selector) = session.selector() {
                    self.selector = selector;
                }
                self.session_id = Some(session.id);
                self.created_at = session.created_at;
                self.messages = session.messages;
                self.title = session.title;
            }
            None => {
                if let Some(id) = session_id {
                    debug!(session = %id, "Requested session not found, starting a new one");
                }
                let id = new_session_id();
                info!(session = %id, selector = %self.selector, "Started session");
                self.session_id = Some(id);
                self.created_at = Utc::now();
                self.messages = vec![Message::assistant(catalog::greeting(&self.selector))];
                self.title = catalog::default_title(&self.selector);
            }
        }

        self.state = ViewState::Ready;
        Ok(())
    }

    /// Navigate this view to another persona/topic or session.
    pub fn open(&mut self, selector: Selector, session_id: Option<&str>) -> Result<()> {
        self.selector = selector;
        self.mount(session_id)
    }

    /// Append the user's message and hand back the request to send.
    ///
    /// Returns `None` when the view is not ready or the input is blank.
    pub fn begin_submit(&mut self, input: &str) -> Option<PendingTurn> {
        if self.state != ViewState::Ready {
            return None;
        }
        let content = normalize_input(input)?;
        let session_id = self.session_id.clone()?;

        self.error = None;
        self.messages.push(Message::user(content));
        self.persist();
        self.state = ViewState::Awaiting;

        Some(PendingTurn {
            session_id,
            request: DispatchRequest {
                messages: self.messages.clone(),
                character_id: self.selector.character_id().map(str::to_string),
                topic_id: self.selector.topic_id().map(str::to_string),
            },
        })
    }

    /// Apply the dispatcher's answer to a turn started with `begin_submit`.
    pub fn complete(&mut self, pending: PendingTurn, result: Result<DispatchReply>) -> TurnOutcome {
        let is_current = self.session_id.as_deref() == Some(pending.session_id.as_str());
        if !is_current || self.state != ViewState::Awaiting {
            warn!(session = %pending.session_id, "Dropping reply for a session that is no longer active");
            return TurnOutcome::Discarded;
        }

        self.state = ViewState::Ready;
        match result {
            Ok(reply) => {
                self.messages.push(reply.into_message());
                self.persist();
                TurnOutcome::Replied
            }
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "Chat turn failed");
                self.error = Some(USER_FACING_FAILURE.to_string());
                TurnOutcome::Failed
            }
        }
    }

    /// Run one full turn against `transport`.
    pub async fn submit(&mut self, input: &str, transport: &dyn DispatchTransport) -> TurnOutcome {
        let Some(pending) = self.begin_submit(input) else {
            return TurnOutcome::Ignored;
        };
        let result = transport.send(&pending.request).await;
        self.complete(pending, result)
    }

    /// Write the session to the collection once it holds more than the greeting.
    fn persist(&mut self) {
        if self.messages.len() <= 1 {
            return;
        }
        let Some(mut session) = self.snapshot() else {
            return;
        };
        if let Some(title) = session
            .first_user_message()
            .and_then(|m| derive_title(m.content()))
        {
            session.title = title.clone();
            self.title = title;
        }

        if let Err(e) = self.repository.upsert(&session) {
            warn!(session = %session.id, error = %e, "Failed to save session");
        }
    }

    /// The active session as it would be stored.
    pub fn snapshot(&self) -> Option<ChatSession> {
        let id = self.session_id.as_ref()?;
        let mut session = ChatSession::new(id.clone(), &self.selector, self.title.clone());
        session.created_at = self.created_at;
        session.messages = self.messages.clone();
        Some(session)
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn is_awaiting(&self) -> bool {
        self.state == ViewState::Awaiting
    }
}
