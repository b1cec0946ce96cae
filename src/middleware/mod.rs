pub mod auth;
pub mod validation;

pub use auth::{AuthUser, JwtClaims};
pub use validation::ValidatedJson;
