// Authentication module
// Password hashing, signed bearer tokens, and request identity resolution

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use config::AuthConfig;
pub use error::AuthError;
pub use handlers::login_handler;
pub use middleware::AuthenticatedUser;
pub use models::{LoginRequest, TokenResponse};
pub use password::PasswordService;
pub use service::AuthService;
pub use token::TokenService;
