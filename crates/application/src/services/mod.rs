//! Application services - Use case implementations

mod chat_service;
mod ice_service;
mod quiz_service;
mod realtime_service;

pub use chat_service::{ChatReply, ChatService, DEFAULT_SYSTEM_PROMPT, FALLBACK_REPLY};
pub use ice_service::IceService;
pub use quiz_service::{QUIZ_SYSTEM_PROMPT, QuizService, build_quiz_prompt, parse_model_json};
pub use realtime_service::{NegotiationState, OfferPayload, RealtimeService};
