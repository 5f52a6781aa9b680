//! HTTP request handlers.

pub(crate) mod generate;
pub(crate) mod health;
pub(crate) mod skeleton;
