pub mod api;
pub mod capability;
pub mod commands;
pub mod credential;
pub mod http;
pub mod runtime;
