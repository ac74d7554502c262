//! Per-page view state and its store.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::backend::DispatchError;
use crate::domain::DomainTag;
use crate::reply::{ChatReply, ReplyKind};

/// Default idle timeout (30 minutes).
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Which top-level view is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", content = "domain", rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Landing,
    Chat(DomainTag),
}

/// Result tab in tabbed display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultTab {
    Requirement,
    TestCases,
    Iso,
    Answer,
}

impl ResultTab {
    /// Tabs in display order.
    pub const ALL: [Self; 4] = [Self::Requirement, Self::TestCases, Self::Iso, Self::Answer];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Requirement => "requirement",
            Self::TestCases => "testcases",
            Self::Iso => "iso",
            Self::Answer => "answer",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Requirement => "📌 Requirement",
            Self::TestCases => "🧪 Test Cases",
            Self::Iso => "✅ ISO Validation",
            Self::Answer => "💡 Answer",
        }
    }

    /// Tab to open when a reply of `kind` arrives.
    #[must_use]
    pub fn for_kind(kind: ReplyKind) -> Self {
        match kind {
            ReplyKind::General => Self::Answer,
            ReplyKind::Requirement => Self::Requirement,
            ReplyKind::TestCases => Self::TestCases,
            ReplyKind::IsoValidation => Self::Iso,
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.slug() == slug)
    }
}

/// What the last completed dispatch produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    Reply(ChatReply),
    Failed(DispatchError),
}

/// Everything the page shows, owned by one view session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    pub screen: Screen,
    pub prompt: String,
    pub submitting: bool,
    pub outcome: Option<Outcome>,
    pub active_tab: Option<ResultTab>,
    /// Bumped by every submit and every return to landing.
    pub generation: u64,
    /// Test-case ids marked as passed for the current reply.
    pub passed: BTreeSet<String>,
}

impl ViewState {
    /// Selected domain, if on the chat view.
    #[must_use]
    pub fn domain(&self) -> Option<DomainTag> {
        match self.screen {
            Screen::Landing => None,
            Screen::Chat(domain) => Some(domain),
        }
    }

    fn reset_chat(&mut self) {
        self.prompt.clear();
        self.submitting = false;
        self.outcome = None;
        self.active_tab = None;
        self.passed.clear();
        self.generation += 1;
    }
}

/// Proof that a submit was started; hand it back on completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub generation: u64,
    pub prompt: String,
}

/// Why a submit could not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("no domain selected")]
    NotInChat,
    #[error("a request is already in flight")]
    InFlight,
}

/// One browser page's view session.
#[derive(Debug, Clone)]
pub struct ViewSession {
    inner: Arc<ViewSessionInner>,
}

#[derive(Debug)]
struct ViewSessionInner {
    id: String,
    state: RwLock<ViewState>,
    created_at: DateTime<Utc>,
    last_activity: RwLock<DateTime<Utc>>,
}

impl ViewSession {
    fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            inner: Arc::new(ViewSessionInner {
                id,
                state: RwLock::new(ViewState::default()),
                created_at: now,
                last_activity: RwLock::new(now),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ViewState {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        let result = {
            let mut guard = self
                .inner
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            f(&mut guard)
        };
        self.touch();
        result
    }

    /// Landing → chat for `domain`. Always starts a fresh chat.
    pub fn select_domain(&self, domain: DomainTag) {
        self.update(|s| {
            s.reset_chat();
            s.screen = Screen::Chat(domain);
        });
    }

    /// Chat → landing, discarding prompt, result and marks.
    ///
    /// Any request still in flight is orphaned: its completion will carry a
    /// stale generation and be dropped.
    pub fn back(&self) {
        self.update(|s| {
            s.reset_chat();
            s.screen = Screen::Landing;
        });
    }

    /// Start a submit of `prompt`.
    ///
    /// The prompt is stored only when the submit is accepted. Clears the
    /// previous result and bumps the generation.
    pub fn begin_submit(&self, prompt: impl Into<String>) -> Result<SubmitTicket, SubmitRejected> {
        let prompt = prompt.into();
        self.update(|s| {
            if s.domain().is_none() {
                return Err(SubmitRejected::NotInChat);
            }
            if s.submitting {
                return Err(SubmitRejected::InFlight);
            }
            s.prompt = prompt;
            s.submitting = true;
            s.outcome = None;
            s.passed.clear();
            s.generation += 1;
            Ok(SubmitTicket {
                generation: s.generation,
                prompt: s.prompt.clone(),
            })
        })
    }

    /// Record the result of the submit identified by `ticket`.
    ///
    /// Returns `false` (and changes nothing) when the ticket is stale.
    pub fn complete(&self, ticket: &SubmitTicket, result: Result<ChatReply, DispatchError>) -> bool {
        self.update(|s| {
            if ticket.generation != s.generation {
                return false;
            }
            s.submitting = false;
            let outcome = match result {
                Ok(reply) => {
                    s.active_tab = Some(ResultTab::for_kind(reply.kind));
                    Outcome::Reply(reply)
                }
                Err(err) => Outcome::Failed(err),
            };
            s.outcome = Some(outcome);
            true
        })
    }

    pub fn select_tab(&self, tab: ResultTab) {
        self.update(|s| s.active_tab = Some(tab));
    }

    /// Flip the passed mark of a test case in the current reply.
    ///
    /// Returns the new mark, or `None` when the id is not in the reply.
    pub fn toggle_passed(&self, test_case_id: &str) -> Option<bool> {
        self.update(|s| {
            let known = match &s.outcome {
                Some(Outcome::Reply(reply)) => reply.test_case_ids().contains(&test_case_id),
                _ => false,
            };
            if !known {
                return None;
            }
            if s.passed.remove(test_case_id) {
                Some(false)
            } else {
                s.passed.insert(test_case_id.to_string());
                Some(true)
            }
        })
    }

    fn touch(&self) {
        let mut guard = self
            .inner
            .last_activity
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Utc::now();
    }

    /// Check if the session has been idle longer than `timeout`.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = *self
            .inner
            .last_activity
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        // Negative spans (clock skew) never expire.
        (Utc::now() - last)
            .to_std()
            .is_ok_and(|idle| idle > timeout)
    }
}

/// Thread-safe store for view sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Debug)]
struct SessionStoreInner {
    sessions: RwLock<HashMap<String, ViewSession>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                sessions: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Create a new session with a random id.
    #[must_use]
    pub fn create(&self) -> ViewSession {
        self.create_with_id(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn create_with_id(&self, id: impl Into<String>) -> ViewSession {
        let id = id.into();
        let session = ViewSession::new(id.clone());
        self.write().insert(id, session.clone());
        session
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<ViewSession> {
        self.read().get(id).cloned()
    }

    pub fn remove(&self, id: &str) -> Option<ViewSession> {
        self.write().remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove sessions idle longer than `timeout`; returns how many went.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self.write();
        let before = guard.len();
        guard.retain(|_, session| !session.is_expired_with_timeout(timeout));
        before - guard.len()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, ViewSession>> {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, ViewSession>> {
        self.inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
