//! Request handlers and error mapping

pub mod error;

pub use error::{handle_domain_error_with_lang, request_language, validation_failure};
