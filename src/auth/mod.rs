//! API-key authentication and admin authorization.
//!
//! Every protected route goes through [`middleware::require_api_key`],
//! which matches the `Hotels-Api-Key` header against the stored digest for
//! the admin named in `Admin-User-Name`. Routes touching a specific hotel,
//! booking or customer additionally run one of the affiliation checks in
//! [`guards`].

pub mod api_key;
pub mod guards;
pub mod middleware;
pub mod password;

pub use api_key::{generate_api_key, hash_api_key, verify_api_key};
pub use middleware::{require_api_key, AdminIdentity, AuthState};
