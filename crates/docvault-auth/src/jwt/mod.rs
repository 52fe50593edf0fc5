//! Identity token claims, verification and issuing.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{Identity, IdentityClaims};
pub use decoder::IdentityVerifier;
pub use encoder::IdentityTokenIssuer;
