//! `.env` loading
//!
//! Outside production, variables from a `.env` file in the working
//! directory (or a parent) are loaded before configuration is read.
//! Variables already set in the environment win.

/// Environment variable that marks a production deployment
pub const ENV_VAR: &str = "CONTACTD_ENV";

pub fn is_production() -> bool {
    std::env::var(ENV_VAR).is_ok_and(|v| v.eq_ignore_ascii_case("production"))
}

/// Load `.env` unless running in production.
///
/// Runs before tracing is initialised, so the outcome is returned for the
/// caller to log.
pub fn load_dotenv() -> Option<std::path::PathBuf> {
    if is_production() {
        return None;
    }
    dotenvy::dotenv().ok()
}
