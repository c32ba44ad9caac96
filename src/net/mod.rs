//! Network plumbing shared by the IP-echo resolver and the DNS provider
//! client.
//!
//! This module provides:
//! - HTTP request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - The HTTP client seam ([`HttpClient`]) and its production
//!   implementation ([`ReqwestClient`])
//! - The connectivity pre-check seam ([`ConnectivityProbe`]) and its
//!   production implementation ([`TcpProbe`])

mod client;
mod error;
mod http;
mod probe;


pub use client::ReqwestClient;
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use probe::{ConnectivityProbe, TcpProbe};
