use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bevy_ecs::resource::Resource;

use super::human::{Citizen, Human, Pedestrian};
use crate::engine::RecordStore;
use crate::id::{HumanId, ObjectId, PedestrianId};
use crate::model::{HumanRecord, PedestrianRecord};

/// What a human handle currently resolves to in the engine.
enum Resolution {
    Moving {
        record: HumanRecord,
        pedestrian_id: PedestrianId,
        pedestrian: PedestrianRecord,
    },
    Static {
        record: HumanRecord,
    },
}

impl Resolution {
    fn of(store: &dyn RecordStore, id: HumanId) -> Option<Self> {
        let record = store.human(id)?;
        let moving = record.instance.and_then(|pid| {
            let pedestrian = store.pedestrian(pid)?;
            (pedestrian.citizen == Some(id)).then_some((pid, pedestrian))
        });
        Some(match moving {
            Some((pedestrian_id, pedestrian)) => Resolution::Moving {
                record,
                pedestrian_id,
                pedestrian,
            },
            None => Resolution::Static { record },
        })
    }

    fn pedestrian_id(&self) -> Option<PedestrianId> {
        match self {
            Resolution::Moving { pedestrian_id, .. } => Some(*pedestrian_id),
            Resolution::Static { .. } => None,
        }
    }

    fn record(&self) -> &HumanRecord {
        match self {
            Resolution::Moving { record, .. } | Resolution::Static { record } => record,
        }
    }

    /// A cached wrapper is still the right one if it has the same shape and
    /// was built from the same citizen record. Handles are recycled, so a
    /// changed record means the slot may now belong to someone else.
    fn matches(&self, human: &Human) -> bool {
        self.pedestrian_id() == human.pedestrian_id() && self.record() == human.citizen().record()
    }

    fn build(self, id: HumanId) -> Human {
        match self {
            Resolution::Moving {
                record,
                pedestrian_id,
                pedestrian,
            } => Human::Pedestrian(Pedestrian::new(
                Citizen::new(id, record),
                pedestrian_id,
                pedestrian.target_position,
            )),
            Resolution::Static { record } => Human::Citizen(Citizen::new(id, record)),
        }
    }
}

/// Identity map from human handles to their single live wrapper.
///
/// Lookups re-resolve the handle against the engine every time, so a wrapper
/// is never handed out after the engine has freed or repurposed its handle.
/// Entries whose identity changed are replaced; entries whose handle vanished
/// are dropped.
#[derive(Resource, Debug, Default)]
pub struct AgentCache {
    humans: RwLock<HashMap<HumanId, Arc<Human>>>,
}

impl AgentCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<HumanId, Arc<Human>>> {
        self.humans.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<HumanId, Arc<Human>>> {
        self.humans.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wrapper for `id`, or `None` if the engine no longer knows it.
    pub fn of_human(&self, store: &dyn RecordStore, id: HumanId) -> Option<Arc<Human>> {
        let Some(resolution) = Resolution::of(store, id) else {
            // Most unknown handles were never cached; only those need the write lock.
            let cached = self.read().contains_key(&id);
            if cached && self.write().remove(&id).is_some() {
                tracing::debug!(human = %id, "evicted wrapper for vanished handle");
            }
            return None;
        };

        if let Some(human) = self.read().get(&id)
            && resolution.matches(human)
        {
            return Some(Arc::clone(human));
        }

        let mut humans = self.write();
        // Another reader may have built it while we waited for the lock.
        if let Some(human) = humans.get(&id)
            && resolution.matches(human)
        {
            return Some(Arc::clone(human));
        }
        let human = Arc::new(resolution.build(id));
        tracing::debug!(
            human = %id,
            moving = human.has_motion_history(),
            "built agent wrapper"
        );
        humans.insert(id, Arc::clone(&human));
        Some(human)
    }

    /// Moving wrapper for a pedestrian instance.
    pub fn of_pedestrian(&self, store: &dyn RecordStore, id: PedestrianId) -> Option<Arc<Human>> {
        let citizen = store.pedestrian(id)?.citizen?;
        let human = self.of_human(store, citizen)?;
        if human.pedestrian_id() == Some(id) {
            Some(human)
        } else {
            tracing::warn!(
                pedestrian = %id,
                human = %citizen,
                "pedestrian back-link does not match citizen instance"
            );
            None
        }
    }

    /// Dispatch on handle kind; non-human objects are never tracked here.
    pub fn of(&self, store: &dyn RecordStore, id: ObjectId) -> Option<Arc<Human>> {
        match id {
            ObjectId::Human(hid) => self.of_human(store, hid),
            ObjectId::Pedestrian(pid) => self.of_pedestrian(store, pid),
            _ => None,
        }
    }

    /// Drop every wrapper whose handle no longer resolves to the same identity.
    /// Returns how many were dropped.
    pub fn prune(&self, store: &dyn RecordStore) -> usize {
        let mut humans = self.write();
        let before = humans.len();
        humans.retain(|&id, human| {
            Resolution::of(store, id).is_some_and(|resolution| resolution.matches(human))
        });
        let dropped = before - humans.len();
        if dropped > 0 {
            tracing::debug!(dropped, remaining = humans.len(), "pruned agent cache");
        }
        dropped
    }

    /// Record this tick's position for every cached pedestrian. Returns how many were written.
    pub fn record_tick(&self, store: &dyn RecordStore, tick: u32) -> usize {
        self.read()
            .values()
            .filter_map(|human| human.as_pedestrian())
            .filter(|ped| ped.record_tick(store, tick))
            .count()
    }

    /// All live pedestrians accepted by `filter`, in instance order.
    pub fn pedestrians_where(
        &self,
        store: &dyn RecordStore,
        mut filter: impl FnMut(&Pedestrian) -> bool,
    ) -> Vec<Arc<Human>> {
        (1..store.instance_count())
            .map_while(|index| u16::try_from(index).ok())
            .filter_map(PedestrianId::from_index)
            .filter_map(|pid| self.of_pedestrian(store, pid))
            .filter(|human| human.as_pedestrian().is_some_and(&mut filter))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
