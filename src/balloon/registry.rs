//! Balloon registry
//!
//! Balloons are stored in a slot arena addressed by generational
//! [`BalloonId`]s. Removing a balloon bumps its slot's generation, so a stale
//! id resolves to `None` even after the slot is reused.

use glam::Vec3;

use super::{Balloon, BalloonPolicy, BalloonState, Population, RetirePolicy};
use crate::assets::MeshHandle;
use crate::scene::{ObjectId, Scene, SceneResult, Transform};

/// Stable handle to a balloon in a [`BalloonRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BalloonId {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    balloon: Option<Balloon>,
}

/// Owns every balloon and steps them against a [`Scene`].
#[derive(Debug)]
pub struct BalloonRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    policy: BalloonPolicy,
    /// Shared object shown where a balloon is popping
    pop_effect: Option<ObjectId>,
    /// Mesh for balloons spawned at runtime
    spawn_mesh: Option<MeshHandle>,
    /// Hidden objects of pruned balloons, reused by later spawns
    spare_objects: Vec<ObjectId>,
    spawned: usize,
    ever_held: bool,
}

impl BalloonRegistry {
    pub fn new(policy: BalloonPolicy) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            policy,
            pop_effect: None,
            spawn_mesh: None,
            spare_objects: Vec::new(),
            spawned: 0,
            ever_held: false,
        }
    }

    pub fn policy(&self) -> &BalloonPolicy {
        &self.policy
    }

    pub fn set_pop_effect(&mut self, object: Option<ObjectId>) {
        self.pop_effect = object;
    }

    pub fn pop_effect(&self) -> Option<ObjectId> {
        self.pop_effect
    }

    /// Mesh given to objects created for spawned balloons. Without one,
    /// spawned balloons are simulated but not drawn.
    pub fn set_spawn_mesh(&mut self, mesh: Option<MeshHandle>) {
        self.spawn_mesh = mesh;
    }

    pub fn insert(&mut self, balloon: Balloon) -> BalloonId {
        self.ever_held = true;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.balloon = Some(balloon);
                BalloonId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    balloon: Some(balloon),
                });
                BalloonId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    pub fn remove(&mut self, id: BalloonId) -> Option<Balloon> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let balloon = slot.balloon.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(balloon)
    }

    pub fn get(&self, id: BalloonId) -> Option<&Balloon> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.balloon.as_ref())
    }

    pub fn get_mut(&mut self, id: BalloonId) -> Option<&mut Balloon> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.balloon.as_mut())
    }

    /// Live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (BalloonId, &Balloon)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.balloon.as_ref().map(|balloon| {
                (
                    BalloonId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    balloon,
                )
            })
        })
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Balloons that are not Gone.
    pub fn active_count(&self) -> usize {
        self.iter()
            .filter(|(_, b)| b.state() != BalloonState::Gone)
            .count()
    }

    /// The registry has held at least one balloon and none is left that is
    /// not Gone.
    pub fn is_cleared(&self) -> bool {
        self.ever_held && self.active_count() == 0
    }

    /// Start popping every Healthy balloon containing `probe`.
    pub fn pop_touching(&mut self, probe: Vec3) -> Vec<BalloonId> {
        let mut popped = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(balloon) = slot.balloon.as_mut() else {
                continue;
            };
            if balloon.state() == BalloonState::Healthy && balloon.contains(probe) && balloon.pop() {
                log::debug!("Balloon {} popped at {:?}", index, balloon.center);
                popped.push(BalloonId {
                    index: index as u32,
                    generation: slot.generation,
                });
            }
        }
        popped
    }

    /// Advance every balloon by `dt` and mirror the result into `scene`.
    pub fn step(&mut self, dt: f32, scene: &mut Scene) -> SceneResult<()> {
        if self.policy.retire == RetirePolicy::Prune {
            self.prune_gone();
        }

        let policy = self.policy;
        let pop_effect = self.pop_effect;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(balloon) = slot.balloon.as_mut() else {
                continue;
            };
            match balloon.state() {
                BalloonState::Healthy => {
                    balloon.integrate(dt, policy.motion);
                    if let Some(object) = balloon.object {
                        scene.object_mut(object)?.transform.position = balloon.center;
                    }
                }
                BalloonState::Popping => {
                    if let Some(object) = balloon.object {
                        scene.set_visible(object, false)?;
                    }
                    if let Some(effect) = pop_effect {
                        let effect = scene.object_mut(effect)?;
                        effect.invisible = false;
                        effect.transform.position = balloon.center;
                    }
                    if balloon.advance_pop(dt, policy.pop_duration) {
                        log::debug!("Balloon {} gone", index);
                        if let Some(effect) = pop_effect {
                            scene.set_visible(effect, false)?;
                        }
                    }
                }
                BalloonState::Gone => {}
            }
        }

        if let Population::Maintain {
            min_active,
            spawn_point,
            velocity,
        } = policy.population
        {
            while self.active_count() < min_active {
                self.spawn(scene, spawn_point, velocity)?;
            }
        }
        Ok(())
    }

    fn prune_gone(&mut self) {
        let gone: Vec<BalloonId> = self
            .iter()
            .filter(|(_, b)| b.state() == BalloonState::Gone)
            .map(|(id, _)| id)
            .collect();
        for id in gone {
            if let Some(object) = self.remove(id).and_then(|b| b.object) {
                self.spare_objects.push(object);
            }
        }
    }

    /// A hidden object no balloon will show again: one left by pruning, or
    /// one still held by a Gone balloon.
    fn take_spare_object(&mut self) -> Option<ObjectId> {
        self.spare_objects.pop().or_else(|| {
            self.slots
                .iter_mut()
                .filter_map(|slot| slot.balloon.as_mut())
                .find(|b| b.state() == BalloonState::Gone && b.object.is_some())
                .and_then(|b| b.object.take())
        })
    }

    /// Insert a Healthy balloon at `point`, reusing a spare object or
    /// creating one when a spawn mesh is set.
    fn spawn(&mut self, scene: &mut Scene, point: Vec3, velocity: Vec3) -> SceneResult<BalloonId> {
        let object = match (self.take_spare_object(), self.spawn_mesh) {
            (Some(object), _) => Some(object),
            (None, Some(mesh)) => Some(scene.add_object(
                format!("Spawned{}", self.spawned),
                Transform::from_position(point),
                mesh,
            )),
            (None, None) => None,
        };
        if let Some(object) = object {
            let object = scene.object_mut(object)?;
            object.transform.position = point;
            object.invisible = false;
        }

        self.spawned += 1;
        let mut balloon = Balloon::new(point, self.policy.radius, velocity);
        balloon.object = object;
        let id = self.insert(balloon);
        log::debug!("Spawned balloon {:?} at {:?}", id, point);
        Ok(id)
    }
}
