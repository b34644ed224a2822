//! Branch Operations
//!
//! Structural mutations on a profile's realities: fork, switch, delete and
//! instantiate-from-template. Each function validates first and only then
//! touches the profile, so an `Err` always means "nothing changed".

use super::templates::find_template;
use super::types::{new_id, CareerReality, StudentProfile};
use crate::error::{EntityKind, MultiverseError, Result};
use chrono::Utc;
use std::collections::HashSet;

/// Deep-copies `source_id` into a new child reality and makes it active
pub fn fork(profile: &mut StudentProfile, source_id: &str, new_name: &str) -> Result<CareerReality> {
    if new_name.trim().is_empty() {
        return Err(MultiverseError::Validation(
            "reality name is required".to_string(),
        ));
    }
    let source = profile
        .reality(source_id)
        .ok_or_else(|| MultiverseError::not_found(EntityKind::Reality, source_id))?;

    let now = Utc::now();
    let forked = CareerReality {
        id: new_id(),
        parent_id: Some(source.id.clone()),
        name: new_name.to_string(),
        created_at: now,
        last_modified_at: now,
        ..source.clone()
    };

    log::info!(
        "[branch] Forked '{}' ({}) into '{}' ({})",
        source.name,
        source.id,
        forked.name,
        forked.id
    );

    profile.active_reality_id = forked.id.clone();
    profile.realities.push(forked.clone());
    Ok(forked)
}

pub fn switch_active(profile: &mut StudentProfile, reality_id: &str) -> Result<()> {
    if !profile.contains(reality_id) {
        return Err(MultiverseError::not_found(EntityKind::Reality, reality_id));
    }
    profile.active_reality_id = reality_id.to_string();
    log::debug!("[branch] Switched active reality to {}", reality_id);
    Ok(())
}

/// Removes a reality. Its direct children become roots; nothing cascades.
pub fn delete(profile: &mut StudentProfile, reality_id: &str) -> Result<()> {
    if profile.realities.len() <= 1 {
        return Err(MultiverseError::InvalidOperation(
            "Cannot delete the only reality.".to_string(),
        ));
    }
    if profile.active_reality_id == reality_id {
        return Err(MultiverseError::InvalidOperation(
            "Cannot delete active reality. Switch to another first.".to_string(),
        ));
    }
    if !profile.contains(reality_id) {
        return Err(MultiverseError::not_found(EntityKind::Reality, reality_id));
    }

    profile.realities.retain(|r| r.id != reality_id);

    let mut orphaned = 0;
    for reality in profile
        .realities
        .iter_mut()
        .filter(|r| r.parent_id.as_deref() == Some(reality_id))
    {
        reality.parent_id = None;
        orphaned += 1;
    }

    log::info!(
        "[branch] Deleted reality {} ({} children orphaned)",
        reality_id,
        orphaned
    );
    Ok(())
}

/// Appends a new root reality built from a catalog template
pub fn add_from_template(profile: &mut StudentProfile, template_id: &str) -> Result<CareerReality> {
    let template = find_template(template_id)
        .ok_or_else(|| MultiverseError::not_found(EntityKind::Template, template_id))?;

    let reality = template.instantiate(&profile.name, &profile.email);
    log::info!(
        "[branch] Added '{}' ({}) from template {}",
        reality.name,
        reality.id,
        template_id
    );
    profile.realities.push(reality.clone());
    Ok(reality)
}

/// Direct children of a reality
pub fn children<'a>(profile: &'a StudentProfile, reality_id: &str) -> Vec<&'a CareerReality> {
    profile
        .realities
        .iter()
        .filter(|r| r.parent_id.as_deref() == Some(reality_id))
        .collect()
}

/// The reality followed by its ancestors, ending at a root.
///
/// Stops at a dangling parent id or a cycle.
pub fn lineage<'a>(profile: &'a StudentProfile, reality_id: &str) -> Result<Vec<&'a CareerReality>> {
    let mut current = profile
        .reality(reality_id)
        .ok_or_else(|| MultiverseError::not_found(EntityKind::Reality, reality_id))?;

    let mut seen = HashSet::new();
    let mut chain = Vec::new();
    loop {
        if !seen.insert(current.id.as_str()) {
            log::warn!("[branch] Parent cycle detected at {}", current.id);
            break;
        }
        chain.push(current);
        match current.parent_id.as_deref().and_then(|p| profile.reality(p)) {
            Some(parent) => current = parent,
            None => break,
        }
    }
    Ok(chain)
}
