mod common;

use std::sync::Arc;
use std::thread;

use agent_track::model::{HumanRecord, Position};
use agent_track::{AgentCache, BuildingId, Human, ObjectId, RecordStore};
use common::{hid, pid, single_walker};

#[test]
fn repeated_lookup_returns_same_wrapper() {
    let engine = single_walker();
    let cache = AgentCache::new();
    let a = cache.of_human(&engine, hid(1)).unwrap();
    let b = cache.of_human(&engine, hid(1)).unwrap();
    let c = cache.of_pedestrian(&engine, pid(1)).unwrap();
    let d = cache.of(&engine, ObjectId::Pedestrian(pid(1))).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&a, &c));
    assert!(Arc::ptr_eq(&a, &d));
    assert_eq!(cache.len(), 1);
}

#[test]
fn instantiated_citizen_gets_motion_variant() {
    let engine = single_walker();
    let cache = AgentCache::new();
    let human = cache.of_human(&engine, hid(1)).unwrap();
    assert!(human.has_motion_history());
    assert_eq!(human.as_pedestrian().unwrap().pedestrian_id(), pid(1));
}

#[test]
fn citizen_at_home_gets_static_variant() {
    let mut engine = single_walker();
    engine.add_human(
        hid(2),
        HumanRecord {
            home: BuildingId::from_index(4),
            ..HumanRecord::default()
        },
    );
    let cache = AgentCache::new();
    let human = cache.of_human(&engine, hid(2)).unwrap();
    assert!(human.is_static_only());
    assert!(human.as_pedestrian().is_none());
    assert_eq!(human.citizen().home_building(), BuildingId::from_index(4));
}

#[test]
fn unknown_handles_are_absent() {
    let engine = single_walker();
    let cache = AgentCache::new();
    assert!(cache.of_human(&engine, hid(99)).is_none());
    assert!(cache.of_pedestrian(&engine, pid(99)).is_none());
    assert!(
        cache
            .of(&engine, ObjectId::Building(BuildingId::from_index(1).unwrap()))
            .is_none()
    );
    assert!(cache.is_empty());
}

#[test]
fn vanished_handle_is_evicted_on_lookup() {
    let mut engine = single_walker();
    let cache = AgentCache::new();
    cache.of_human(&engine, hid(1)).unwrap();
    engine.remove_human(hid(1));
    assert!(cache.of_human(&engine, hid(1)).is_none());
    assert!(cache.is_empty());
}

#[test]
fn reused_pedestrian_slot_builds_a_new_wrapper() {
    let mut engine = single_walker();
    let cache = AgentCache::new();
    let old = cache.of_pedestrian(&engine, pid(1)).unwrap();

    // The engine frees instance #1 and hands it to another citizen.
    engine.despawn_pedestrian(pid(1));
    engine.spawn_pedestrian(hid(2), pid(1), Position::new(9.0, 0.0, 9.0));

    let new = cache.of_pedestrian(&engine, pid(1)).unwrap();
    assert!(!Arc::ptr_eq(&old, &new));
    assert_eq!(new.id(), hid(2));
    // Fresh history starts at the new owner's position.
    assert_eq!(
        new.as_pedestrian().unwrap().history().read(0),
        Position::new(9.0, 0.0, 9.0)
    );

    // The first citizen is still known, now without a moving instance.
    let first = cache.of_human(&engine, hid(1)).unwrap();
    assert!(first.is_static_only());
}

#[test]
fn reused_static_handle_builds_a_new_wrapper() {
    let mut engine = single_walker();
    engine.add_human(
        hid(5),
        HumanRecord {
            home: BuildingId::from_index(1),
            ..HumanRecord::default()
        },
    );
    let cache = AgentCache::new();
    let old = cache.of_human(&engine, hid(5)).unwrap();

    // The engine frees citizen #5 and hands the handle to someone else.
    engine.remove_human(hid(5));
    engine.add_human(
        hid(5),
        HumanRecord {
            home: BuildingId::from_index(2),
            ..HumanRecord::default()
        },
    );

    assert_eq!(cache.prune(&engine), 1);
    let new = cache.of_human(&engine, hid(5)).unwrap();
    assert!(!Arc::ptr_eq(&old, &new));
    assert_eq!(new.citizen().home_building(), BuildingId::from_index(2));

    // Same handoff, discovered by lookup instead of pruning.
    engine.human_record_mut(hid(5)).unwrap().home = BuildingId::from_index(3);
    let newer = cache.of_human(&engine, hid(5)).unwrap();
    assert!(!Arc::ptr_eq(&new, &newer));
    assert_eq!(newer.citizen().home_building(), BuildingId::from_index(3));
    assert_eq!(cache.len(), 1);
}

#[test]
fn variant_follows_instantiation() {
    let mut engine = single_walker();
    engine.despawn_pedestrian(pid(1));
    let cache = AgentCache::new();
    let resting = cache.of_human(&engine, hid(1)).unwrap();
    assert!(resting.is_static_only());

    engine.spawn_pedestrian(hid(1), pid(5), Position::ORIGIN);
    let walking = cache.of_human(&engine, hid(1)).unwrap();
    assert!(walking.has_motion_history());
    assert!(!Arc::ptr_eq(&resting, &walking));
    assert!(Arc::ptr_eq(
        &walking,
        &cache.of_human(&engine, hid(1)).unwrap()
    ));
}

#[test]
fn mismatched_back_link_is_absent() {
    let mut engine = single_walker();
    // Instance #1 claims citizen #1, but citizen #1 points at another instance.
    engine.human_record_mut(hid(1)).unwrap().instance = Some(pid(7));
    let cache = AgentCache::new();
    assert!(cache.of_pedestrian(&engine, pid(1)).is_none());
    // The citizen itself still resolves, as a static wrapper.
    assert!(cache.of_human(&engine, hid(1)).unwrap().is_static_only());
}

#[test]
fn prune_drops_only_invalid_entries() {
    let mut engine = single_walker();
    engine.spawn_pedestrian(hid(2), pid(2), Position::ORIGIN);
    engine.spawn_pedestrian(hid(3), pid(3), Position::ORIGIN);
    let cache = AgentCache::new();
    for i in 1..=3 {
        cache.of_human(&engine, hid(i)).unwrap();
    }
    let keep = cache.of_human(&engine, hid(1)).unwrap();

    engine.remove_human(hid(2));
    engine.despawn_pedestrian(pid(3));
    assert_eq!(cache.prune(&engine), 2);
    assert_eq!(cache.len(), 1);
    assert!(Arc::ptr_eq(&keep, &cache.of_human(&engine, hid(1)).unwrap()));
    assert_eq!(cache.prune(&engine), 0);
}

#[test]
fn racing_readers_converge_on_one_instance() {
    let mut engine = single_walker();
    engine.scatter(11, 64, 50.0);
    let cache = AgentCache::new();

    let results: Vec<Vec<Arc<Human>>> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    (1..=64)
                        .map(|i| cache.of_pedestrian(&engine, pid(i)).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(cache.len(), 64);
    for i in 1..=64u16 {
        let retained = cache.of_pedestrian(&engine, pid(i)).unwrap();
        for per_thread in &results {
            assert!(Arc::ptr_eq(&retained, &per_thread[usize::from(i) - 1]));
        }
    }
}

#[test]
fn record_tick_skips_static_and_vanished_agents() {
    let mut engine = single_walker();
    engine.spawn_pedestrian(hid(2), pid(2), Position::ORIGIN);
    engine.add_human(hid(3), HumanRecord::default());
    let cache = AgentCache::new();
    for i in 1..=3 {
        cache.of_human(&engine, hid(i)).unwrap();
    }
    assert_eq!(cache.record_tick(&engine, 16), 2);

    engine.despawn_pedestrian(pid(2));
    assert_eq!(cache.record_tick(&engine, 32), 1);
}

#[test]
fn pedestrians_where_filters_live_instances() {
    let mut engine = single_walker();
    engine.spawn_pedestrian(hid(2), pid(2), Position::ORIGIN);
    engine.spawn_pedestrian(hid(3), pid(4), Position::ORIGIN);
    engine.pedestrian_record_mut(pid(4)).unwrap().last_velocity =
        agent_track::Displacement::new(3.0, 0.0, 4.0);
    let cache = AgentCache::new();

    let all = cache.pedestrians_where(&engine, |_| true);
    assert_eq!(all.len(), 3);

    let fast = cache.pedestrians_where(&engine, |ped| {
        ped.speed(&engine).is_some_and(|speed| speed > 1.0)
    });
    assert_eq!(fast.len(), 1);
    assert_eq!(fast[0].id(), hid(3));
    assert_eq!(engine.instance_count(), 5);
}

#[test]
fn pedestrians_where_reaches_the_last_slot() {
    let mut engine = single_walker();
    engine.spawn_pedestrian(hid(2), pid(u16::MAX), Position::ORIGIN);
    assert_eq!(engine.instance_count(), 65_536);

    let cache = AgentCache::new();
    let all = cache.pedestrians_where(&engine, |_| true);
    let ids: Vec<_> = all.iter().map(|human| human.id()).collect();
    assert_eq!(ids, [hid(1), hid(2)]);
}
