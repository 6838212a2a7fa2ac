//! Gateway request layer - one call, one outcome
//!
//! This module provides:
//! - `RequestSpec`: builder describing a single request against the gateway
//! - `RequestGateway`: reqwest-backed client bound to an injected origin
//! - `PendingRequest`: abortable future resolving to a `RequestOutcome`
//! - `RequestError`: the three failure shapes (status, no response, construction)

pub mod client;
pub mod outcome;
pub mod request;

pub use client::{DEFAULT_TIMEOUT, PendingRequest, RequestGateway};
pub use outcome::{NO_RESPONSE_MESSAGE, RequestError, RequestHandle, RequestOutcome};
pub use request::RequestSpec;

pub use reqwest::{Method, Url};
