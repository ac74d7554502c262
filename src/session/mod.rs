//! View-session management.
//!
//! Each browser page gets its own view session holding the state the page
//! renders from: which screen is showing, the prompt, whether a request is in
//! flight, and the last outcome. Sessions live in memory only.
//!
//! # Example
//!
//! ```rust
//! use healthcare_assistant_ui::domain::DomainTag;
//! use healthcare_assistant_ui::session::{Screen, SessionStore};
//!
//! let store = SessionStore::new();
//! let session = store.create();
//! session.select_domain(DomainTag::Insulin);
//! assert_eq!(session.snapshot().screen, Screen::Chat(DomainTag::Insulin));
//!
//! session.back();
//! assert_eq!(session.snapshot().screen, Screen::Landing);
//! ```

mod view;

pub use view::{
    DEFAULT_IDLE_TIMEOUT, Outcome, ResultTab, Screen, SessionStore, SubmitRejected, SubmitTicket,
    ViewSession, ViewState,
};
