//! Conversation session manager for Solace.
//!
//! Owns the ordered message timeline, schedules replies through a
//! replaceable reply service, and tells the viewport when to follow the
//! newest content.

pub mod error;
pub mod http;
pub mod responder;
pub mod store;
pub mod types;
pub mod viewport;
pub mod voice;

pub use error::{ChatError, ReplyError};
pub use http::HttpReplyService;
pub use responder::{compose_reply, ReplyService, SimulatedReplyService};
pub use store::{ConversationStore, ConversationView};
pub use types::{ConversationEvent, Message, ReplyRequest, ReplyResponse, ReplyToken};
pub use viewport::{ScrollHost, ViewportSync};
pub use voice::VoiceControl;
