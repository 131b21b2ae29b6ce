pub mod autocomplete;
pub mod cache;
pub mod channel;
pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod location;
pub mod replay;
pub mod scheduler;
pub mod session;
pub mod templates;
pub mod typing;
