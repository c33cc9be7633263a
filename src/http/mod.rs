//! Authenticated JSON request client with uniform outcome classification.

mod classify;
mod client;
mod descriptor;
mod outcome;

pub use classify::{NO_DATA_RECEIVED, classify, error_message};
pub use client::{AuthClient, NETWORK_ERROR};
pub use descriptor::RequestDescriptor;
pub use outcome::{Outcome, RequestError};
