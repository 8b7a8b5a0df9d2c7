//! Which widget placements currently exist.

use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock};

use crate::models::surface::{SurfaceInstanceId, SurfaceType};

/// The host's record of placed widgets.
#[cfg_attr(test, mockall::automock)]
pub trait SurfaceRegistry: Send + Sync {
    fn live_instance_ids(&self, surface: SurfaceType) -> Vec<SurfaceInstanceId>;
}

/// Surface types with at least one live instance, in [`SurfaceType::ALL`]
/// order. Queried afresh on every call; instances come and go between calls.
pub fn detect_active(registry: &dyn SurfaceRegistry) -> Vec<SurfaceType> {
    let active: Vec<SurfaceType> = SurfaceType::ALL
        .into_iter()
        .filter(|surface| {
            let count = registry.live_instance_ids(*surface).len();
            if count > 0 {
                log::debug!("Found {} {} widgets", count, surface);
            }
            count > 0
        })
        .collect();
    log::debug!("Active widget types: {:?}", active);
    active
}

pub fn is_active(registry: &dyn SurfaceRegistry, surface: SurfaceType) -> bool {
    !registry.live_instance_ids(surface).is_empty()
}

/// What a registry change did to a surface type's population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceTransition {
    /// The first instance of the type appeared.
    Enabled,
    /// The last instance of the type went away.
    Disabled,
    /// Population changed but the type stayed active (or stayed empty).
    Unchanged,
}

/// Registry kept in memory by the daemon, and by tests.
#[derive(Debug, Default)]
pub struct InMemorySurfaceRegistry {
    instances: RwLock<HashMap<SurfaceType, BTreeSet<SurfaceInstanceId>>>,
}

impl InMemorySurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_instance(&self, surface: SurfaceType, id: SurfaceInstanceId) -> InstanceTransition {
        let mut instances = self.instances.write().unwrap_or_else(PoisonError::into_inner);
        let set = instances.entry(surface).or_default();
        let was_empty = set.is_empty();
        if set.insert(id) && was_empty {
            InstanceTransition::Enabled
        } else {
            InstanceTransition::Unchanged
        }
    }

    pub fn remove_instance(&self, surface: SurfaceType, id: SurfaceInstanceId) -> InstanceTransition {
        let mut instances = self.instances.write().unwrap_or_else(PoisonError::into_inner);
        let Some(set) = instances.get_mut(&surface) else {
            return InstanceTransition::Unchanged;
        };
        if set.remove(&id) && set.is_empty() {
            InstanceTransition::Disabled
        } else {
            InstanceTransition::Unchanged
        }
    }

    pub fn instance_count(&self, surface: SurfaceType) -> usize {
        self.instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&surface)
            .map_or(0, BTreeSet::len)
    }
}

impl SurfaceRegistry for InMemorySurfaceRegistry {
    fn live_instance_ids(&self, surface: SurfaceType) -> Vec<SurfaceInstanceId> {
        self.instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&surface)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}
