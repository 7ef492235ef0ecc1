//! Server configuration from environment.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub jwt_secret: String,
    /// Demo credential accepted by /auth/login
    pub demo_password: String,
    /// How long a pending reservation holds its seats, in seconds
    pub hold_secs: u64,
    /// Fraction of each flight's seats pre-sold at startup
    pub occupancy_rate: f64,
    /// Fixed RNG seed for reproducible occupancy (tests, demos)
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("RESA_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            jwt_secret: env::var("RESA_JWT_SECRET")
                .unwrap_or_else(|_| "resa-dev-secret".to_string()),
            demo_password: env::var("RESA_DEMO_PASSWORD").unwrap_or_else(|_| "demo".to_string()),
            hold_secs: env::var("RESA_HOLD_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(240),
            occupancy_rate: env::var("RESA_OCCUPANCY_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.3),
            seed: env::var("RESA_SEED").ok().and_then(|s| s.parse().ok()),
        }
    }
}
