pub mod app;
pub mod jwt;

pub use app::AppConfig;
pub use jwt::JwtConfig;
