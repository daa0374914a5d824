//! HTTP request handlers

pub mod chat;
pub mod health;
pub mod ice;
pub mod quiz;
pub mod realtime;
