pub mod generate;
pub mod health;

pub use generate::{generate_text, method_not_allowed};
pub use health::{health_check, readiness_check};
