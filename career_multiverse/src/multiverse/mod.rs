//! Multiverse Module - the reality branching core
//!
//! Architecture:
//! - Types: the profile aggregate and everything a reality owns
//! - Store: persisted profile slot plus change observers
//! - Branch: fork / switch / delete / add-from-template
//! - History: typed updates with snapshot history and rollback
//! - Compare: set differences and glitch detection
//! - Merge: deterministic hybrid realities
//! - Manager: read-modify-write facade over all of the above

pub mod branch;
pub mod compare;
pub mod history;
pub mod manager;
pub mod merge;
pub mod store;
pub mod templates;
pub mod types;

pub use compare::{Glitch, GlitchKind, RealityComparison, Severity, SharedSkill, UniqueItems};
pub use history::RealityUpdate;
pub use manager::CareerManager;
pub use store::{
    MemoryStorage, ProfileChanged, ProfileObserver, ProfileStorage, RealityStore, SqliteStorage,
    SubscriptionId,
};
pub use templates::{RealityTemplate, Scenario, ScenarioKind};
pub use types::*;
