//! Domain entities - transient records created per request

mod chat_turn;
mod ice_server;
mod quiz;
mod sdp;

pub use chat_turn::{ChatTurn, MessageRole};
pub use ice_server::IceServer;
pub use quiz::{QuizQuestion, QuizSet};
pub use sdp::{SdpAnswer, SdpOffer};
