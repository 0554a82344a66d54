pub mod health;
pub mod school;

pub use health::{AppStartTime, HealthService, health_routes};
pub use school::school_v1_routes;
