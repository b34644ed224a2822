//! Collaborator services that call into the multiverse core.
//!
//! All three are async and suspend for a configurable simulated delay;
//! dropping the future is the only way to cancel one.

pub mod auth;
pub mod insight;
pub mod roadmap;

pub use auth::{AuthService, Session};
pub use insight::{AnalysisResult, InsightService};
pub use roadmap::RoadmapService;
