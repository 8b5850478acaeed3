mod auth;
mod credentials;

pub use auth::ClientCredentials;
pub use auth::TokenManager;
pub use credentials::load_credentials;
