//! Career Multiverse
//!
//! Parallel "career reality" branches for a single student profile:
//! - Fork, switch, delete and template-based creation of realities
//! - Snapshot history with rollback
//! - Reality comparison with conflict ("glitch") detection
//! - Deterministic merging of two realities
//! - Simulated auth, AI-insight and roadmap collaborators

pub mod config;
pub mod error;
pub mod multiverse;
pub mod services;

pub use config::{ComparisonConfig, ServiceConfig, StoreConfig};
pub use error::{EntityKind, MultiverseError, Result};
pub use multiverse::*;
pub use services::*;
