pub mod auth;
pub mod password;
pub mod pipeline;
pub mod validation;
