pub mod factory;
pub mod ownership;
pub mod token;

pub use factory::build_authenticator;
pub use ownership::OwnershipAuthorizer;
pub use token::{TokenAuthenticator, TokenClaims};
