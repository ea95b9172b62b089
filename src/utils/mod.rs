//! Small shared helpers.

pub mod client_ip;
pub mod token_generator;
