use std::{cmp::Ordering, collections::BinaryHeap};

use acorn::hecs::Entity;
use glam::Vec3;
use rand::Rng;
use tokio::time::Instant;

/// Height above the anchored surface a nut rests at.
pub const NUT_REST_HEIGHT: f32 = 0.0005;

/// What a spawn tick decided to bring into play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnTarget {
    /// The gold nut. If it is already on screen it is repositioned and
    /// re-armed rather than duplicated.
    Gold,
    /// The ordinary nut at this index of the pool.
    Ordinary(usize),
}

/// Decides which nut enters play on each spawn tick.
///
/// Gold slots are fixed up front; ordinary spawns reuse the first
/// inactive nut of the pool, scanned in fixed order. At most one nut is
/// activated per tick, and a tick that finds the whole pool busy does
/// not consume a spawn slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnScheduler {
    gold_indices: Vec<u32>,
    next_index: u32,
}

impl SpawnScheduler {
    pub fn new(total_slots: u32, gold_count: u32, rng: &mut impl Rng) -> Self {
        Self {
            gold_indices: gold_spawn_indices(total_slots, gold_count, rng),
            next_index: 1,
        }
    }

    /// The precomputed gold spawn slots, ascending.
    pub fn gold_indices(&self) -> &[u32] {
        &self.gold_indices
    }

    /// Pick the nut to activate this tick, if any. `pool_active` holds
    /// the on-screen flag of each ordinary nut, in pool order.
    pub fn select(&mut self, pool_active: &[bool]) -> Option<SpawnTarget> {
        if self.gold_indices.contains(&self.next_index) {
            self.next_index += 1;
            return Some(SpawnTarget::Gold);
        }

        match pool_active.iter().position(|active| !active) {
            Some(index) => {
                self.next_index += 1;
                Some(SpawnTarget::Ordinary(index))
            }
            None => None,
        }
    }
}

/// Pick the gold spawn slots for a session: `count` distinct indices,
/// each drawn from the next slice of the remaining slots, so the golds
/// are spread across the whole game rather than clustering.
fn gold_spawn_indices(total_slots: u32, count: u32, rng: &mut impl Rng) -> Vec<u32> {
    let count = count.min(total_slots);
    let mut indices = Vec::with_capacity(count as usize);
    for i in 0..count {
        let lo = total_slots * i / count + 1;
        let hi = total_slots * (i + 1) / count;
        indices.push(rng.gen_range(lo..=hi));
    }
    indices
}

/// Random rest position for a freshly spawned nut: uniform on the two
/// horizontal axes, fixed height above the surface.
pub fn spawn_position(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        rng.gen_range(-1.0..=1.0),
        NUT_REST_HEIGHT,
        rng.gen_range(-1.0..=1.0),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ExpiryEntry {
    at: Instant,
    nut: Entity,
}

// BinaryHeap is a max-heap; reverse the comparison so the earliest
// deadline surfaces first.
impl Ord for ExpiryEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .cmp(&self.at)
            .then_with(|| other.nut.to_bits().cmp(&self.nut.to_bits()))
    }
}

impl PartialOrd for ExpiryEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending auto-despawn deadlines.
///
/// Deadlines are armed when a spawn completes and never cancelled;
/// whoever pops one is expected to re-check the nut's flags first, so a
/// deadline for a nut that was meanwhile caught is a harmless no-op.
#[derive(Debug, Default)]
pub struct ExpiryQueue {
    heap: BinaryHeap<ExpiryEntry>,
}

impl ExpiryQueue {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn arm(&mut self, at: Instant, nut: Entity) {
        self.heap.push(ExpiryEntry { at, nut });
    }

    /// The earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|entry| entry.at)
    }

    /// Pop the next deadline if it is due.
    pub fn pop_due(&mut self, now: Instant) -> Option<Entity> {
        match self.heap.peek() {
            Some(entry) if entry.at <= now => self.heap.pop().map(|entry| entry.nut),
            _ => None,
        }
    }
}
