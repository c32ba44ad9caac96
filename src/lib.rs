//! ddns-sync: Dynamic DNS record synchronizer
//!
//! A library for keeping DNS records pointed at the host's current public
//! IP: discover the address through public echo services, select the
//! records to manage, and rewrite any whose content has drifted.

pub mod config;
pub mod domains;
pub mod ipecho;
pub mod net;
pub mod provider;
pub mod sync;
