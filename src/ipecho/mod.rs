//! Public IP discovery over plaintext echo services.
//!
//! The host's public address is whatever the internet sees, so it is asked
//! of external echo services that answer `GET /` with the caller's IP in
//! plain text. Several services are tried in a fixed order; the first usable
//! answer wins and discovery fails only when every endpoint does.

mod resolver;


pub use resolver::{
    DEFAULT_ENDPOINTS, DiscoveryError, EndpointFailure, IpResolver, PublicIpResolver,
};
