use std::collections::BTreeMap;

use super::human::{Citizen, Human, Pedestrian};
use crate::engine::{LocationResolver, RecordStore};
use crate::id::ObjectId;
use crate::model::InstanceFlags;

/// Ordered label → value pairs for an info panel.
pub type Infos = BTreeMap<String, String>;

impl Citizen {
    pub fn name(&self, store: &dyn RecordStore) -> Option<String> {
        store.citizen_name(self.id())
    }

    /// Occupation and home, with fallbacks when the buildings are gone.
    pub fn infos(&self, places: &dyn LocationResolver) -> Infos {
        let mut details = Infos::new();
        let occupation = if self.is_tourist() {
            "(tourist)".to_string()
        } else {
            let home = self
                .home_building()
                .and_then(|bid| places.building_name(bid))
                .unwrap_or_else(|| "(homeless)".to_string());
            details.insert("Home".to_string(), home);

            match self.work_building().and_then(|bid| places.building_name(bid)) {
                Some(name) if self.is_student() => format!("student at: {name}"),
                Some(name) => format!("worker at: {name}"),
                None => "(unemployed)".to_string(),
            }
        };
        details.insert("Occupation".to_string(), occupation);
        details
    }
}

impl Pedestrian {
    fn has_flag(&self, store: &dyn RecordStore, flag: InstanceFlags) -> bool {
        store
            .pedestrian(self.pedestrian_id())
            .is_some_and(|record| record.flags.contains(flag))
    }

    pub fn is_entering_vehicle(&self, store: &dyn RecordStore) -> bool {
        self.has_flag(store, InstanceFlags::ENTERING_VEHICLE)
    }

    pub fn is_hanging_around(&self, store: &dyn RecordStore) -> bool {
        self.has_flag(store, InstanceFlags::HANG_AROUND)
    }

    /// Magnitude of the engine's last-frame velocity.
    pub fn speed(&self, store: &dyn RecordStore) -> Option<f32> {
        store
            .pedestrian(self.pedestrian_id())
            .map(|record| record.last_velocity.distance())
    }

    pub fn prefab_name(&self, store: &dyn RecordStore) -> Option<String> {
        store.prefab_name(self.pedestrian_id())
    }

    /// Localized activity, followed by the name of the place it refers to.
    pub fn status(&self, store: &dyn RecordStore, places: &dyn LocationResolver) -> Option<String> {
        let report = store.localized_status(self.pedestrian_id())?;
        let mut status = report.text;
        let place = match report.target {
            Some(ObjectId::Building(bid)) => places.building_name(bid),
            Some(ObjectId::Node(nid)) => places
                .transit_line_of(nid)
                .and_then(|line| places.transit_line_name(line)),
            _ => None,
        };
        if let Some(place) = place {
            status.push_str(&place);
        }
        Some(status)
    }
}

impl Human {
    pub fn name(&self, store: &dyn RecordStore) -> Option<String> {
        self.citizen().name(store)
    }

    pub fn infos(&self, places: &dyn LocationResolver) -> Infos {
        self.citizen().infos(places)
    }
}
