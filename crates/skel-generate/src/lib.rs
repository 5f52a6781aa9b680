//! Remote skeleton generation.
//!
//! Sends a component to an OpenAI-compatible chat-completions service with an
//! instruction profile describing the skeleton conventions, and checks the
//! returned markup before handing it back.
//!
//! Components are validated locally before any network call
//! ([`validate_component`]); the reply must carry the placeholder fill and
//! the loading marker ([`validate_output`]). Failures are classified into
//! [`ErrorStatus`] classes and rendered as [`ErrorResponse`] bodies.
//!
//! [`RequestSequencer`] guards callers that may have several generations in
//! flight: only the result of the most recent request is accepted.

mod client;
mod error;
mod framework;
mod prompt;
mod sequencer;
mod types;
mod validate;

pub use client::{GeneratorClient, create_agent};
pub use error::{ErrorStatus, GenerateError};
pub use framework::{Framework, detect_framework};
pub use prompt::{INSTRUCTION_PROFILE, user_message};
pub use sequencer::{RequestSequencer, RequestTicket};
pub use types::{ErrorResponse, GenerateRequest, GenerateResponse};
pub use validate::{
    DEFAULT_MAX_INPUT_CHARS, FILL_TOKEN, LOADING_MARKER, validate_component, validate_length,
    validate_output,
};
