//! # docvault-auth
//!
//! Identity boundary for DocVault. An external identity provider signs
//! HS256 tokens carrying the caller's email, display name and avatar. This
//! crate verifies them and hands back a plain [`Identity`].

pub mod jwt;

pub use jwt::{Identity, IdentityClaims, IdentityTokenIssuer, IdentityVerifier};
