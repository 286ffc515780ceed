mod auth;

pub use auth::TokenManager;
pub use auth::basic_authorization;
pub use auth::is_expired;
