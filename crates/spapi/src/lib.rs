//! Selling Partner API access for the MCP tools.
//!
//! [`SellingPartner`] is the capability that authorizes requests and reports readiness;
//! [`Engine`] executes one [`Operation`] through it and hands back a classified envelope.

pub mod client;
pub mod engine;
pub mod error;

pub use client::{
    connect, ClientStatus, Credentials, LwaClient, SellingPartner, UnconfiguredClient,
    ACCESS_TOKEN_HEADER, DEFAULT_ENDPOINT, DEFAULT_LWA_ENDPOINT,
};
pub use engine::{Engine, Fetched, Operation, REQUEST_ID_HEADER, REQUEST_TIMEOUT};
pub use error::{AuthError, CallFailure, ClientError};
