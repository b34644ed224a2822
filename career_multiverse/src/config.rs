//! Configuration for the store, the comparison engine and the simulated
//! collaborators.

use std::path::PathBuf;
use std::time::Duration;

pub const PROFILE_KEY: &str = "career_multiverse_data";
pub const SESSION_KEY: &str = "career_multiverse_user";
pub const HISTORY_LIMIT: usize = 50;

/// Environment variable naming the SQLite file backing the store
pub const DB_PATH_ENV: &str = "CAREER_MULTIVERSE_DB";

/// Configuration for the reality store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// SQLite file; None keeps everything in memory
    pub db_path: Option<PathBuf>,
    /// Slot holding the serialized profile
    pub profile_key: String,
    /// Slot holding the login session
    pub session_key: String,
    /// Snapshots retained per reality
    pub history_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            profile_key: PROFILE_KEY.to_string(),
            session_key: SESSION_KEY.to_string(),
            history_limit: HISTORY_LIMIT,
        }
    }
}

impl StoreConfig {
    /// Reads `CAREER_MULTIVERSE_DB`; everything else keeps its default
    pub fn from_env() -> Self {
        let db_path = std::env::var(DB_PATH_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        Self {
            db_path,
            ..Default::default()
        }
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }
}

/// Tuning for glitch detection
#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    /// Combined weekly hours above which a Time Paradox is reported
    pub weekly_hours_limit: u32,
    /// Also run the DSA/Portfolio and Research/Startup checks from B to A
    pub symmetric_conflicts: bool,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            weekly_hours_limit: 60,
            symmetric_conflicts: false,
        }
    }
}

/// Simulated latency of the async collaborators
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub login_delay: Duration,
    pub signup_delay: Duration,
    pub analysis_delay: Duration,
    pub roadmap_delay: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            login_delay: Duration::from_millis(800),
            signup_delay: Duration::from_millis(1000),
            analysis_delay: Duration::from_millis(1500),
            roadmap_delay: Duration::from_millis(0),
        }
    }
}

impl ServiceConfig {
    /// No delays; used by tests
    pub fn immediate() -> Self {
        Self {
            login_delay: Duration::ZERO,
            signup_delay: Duration::ZERO,
            analysis_delay: Duration::ZERO,
            roadmap_delay: Duration::ZERO,
        }
    }
}
