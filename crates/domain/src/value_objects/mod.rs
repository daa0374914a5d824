//! Value Objects - Immutable, identity-less domain primitives

mod question_count;

pub use question_count::QuestionCount;
