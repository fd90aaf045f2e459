//! HTTP API surface

pub mod classify;
pub mod error;
pub mod health;
pub mod openapi;
pub mod ticket;
