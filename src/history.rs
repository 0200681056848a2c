use std::sync::atomic::{AtomicU32, Ordering};

use crate::model::Position;

/// Number of history slots kept per agent.
pub const SLOT_COUNT: usize = 4;

/// Ticks covered by one slot.
pub const TICKS_PER_SLOT: u32 = 16;

/// Slot that holds the sample for `tick`.
pub fn slot_index(tick: u32) -> usize {
    (tick >> 4 & 3) as usize
}

#[derive(Debug)]
struct Slot {
    x: AtomicU32,
    y: AtomicU32,
    z: AtomicU32,
}

impl Slot {
    fn new(position: Position) -> Self {
        Self {
            x: AtomicU32::new(position.x.to_bits()),
            y: AtomicU32::new(position.y.to_bits()),
            z: AtomicU32::new(position.z.to_bits()),
        }
    }

    fn store(&self, position: Position) {
        self.x.store(position.x.to_bits(), Ordering::Relaxed);
        self.y.store(position.y.to_bits(), Ordering::Relaxed);
        self.z.store(position.z.to_bits(), Ordering::Relaxed);
    }

    fn load(&self) -> Position {
        Position::new(
            f32::from_bits(self.x.load(Ordering::Relaxed)),
            f32::from_bits(self.y.load(Ordering::Relaxed)),
            f32::from_bits(self.z.load(Ordering::Relaxed)),
        )
    }
}

/// Fixed-size ring of recently observed positions, one slot per 16-tick window.
///
/// Written once per tick by the simulation and read concurrently by renderers
/// through a shared reference. A slot is reused every 64 ticks and the buffer
/// never judges staleness: reading a window that was last written long ago
/// returns whatever is there.
///
/// A reader racing a write may observe a mix of old and new components for one
/// slot. Both are recent observations of the same agent, so the predictor
/// tolerates it.
#[derive(Debug)]
pub struct HistoryBuffer {
    slots: [Slot; SLOT_COUNT],
}

impl HistoryBuffer {
    /// A buffer whose every slot holds `position`, so a new agent shows no motion.
    pub fn seeded(position: Position) -> Self {
        Self {
            slots: std::array::from_fn(|_| Slot::new(position)),
        }
    }

    pub fn record(&self, tick: u32, position: Position) {
        self.slots[slot_index(tick)].store(position);
    }

    pub fn read(&self, tick: u32) -> Position {
        self.slots[slot_index(tick)].load()
    }

    /// Slot contents in storage order.
    pub fn snapshot(&self) -> [Position; SLOT_COUNT] {
        std::array::from_fn(|i| self.slots[i].load())
    }
}
