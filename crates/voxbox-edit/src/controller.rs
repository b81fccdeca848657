use serde::Deserialize;
use voxbox_blocks::{BlockType, Selection};
use voxbox_geom::{GridCoord, Vec3};
use voxbox_world::VoxelWorld;

use crate::raycast::pick;
use crate::selection::{Hotbar, SelectionState};

/// Default pick reach in world units.
pub const DEFAULT_REACH: f32 = 8.0;

/// One discrete input transition (key or button down).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    Destroy,
    Place,
    /// Number key `0..=9`.
    SelectSlot(u8),
}

/// Eye position and view direction supplied by the camera collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub forward: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }
}

/// Grid change caused by one input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    Inserted(GridCoord, BlockType),
    Removed(GridCoord),
}

/// Side effects for the presentation collaborator (sound, arm swing, held item).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Destroyed { coord: GridCoord, block: BlockType },
    Placed { coord: GridCoord, block: BlockType },
    SelectionChanged(Selection),
}

/// Applies input events to the world, one mutation at most per event.
///
/// Holds no reference to the world or the selection; both are passed in per
/// call by their owner.
pub struct InteractionController {
    hotbar: Hotbar,
    reach: f32,
    feedback: Vec<Feedback>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(Hotbar::default(), DEFAULT_REACH)
    }
}

impl InteractionController {
    pub fn new(hotbar: Hotbar, reach: f32) -> Self {
        Self {
            hotbar,
            reach,
            feedback: Vec::new(),
        }
    }

    #[inline]
    pub fn reach(&self) -> f32 {
        self.reach
    }

    #[inline]
    pub fn hotbar(&self) -> &Hotbar {
        &self.hotbar
    }

    /// Feedback queued since the last drain, oldest first.
    pub fn drain_feedback(&mut self) -> Vec<Feedback> {
        std::mem::take(&mut self.feedback)
    }

    pub fn handle_input(
        &mut self,
        event: InputEvent,
        camera: &CameraPose,
        world: &mut VoxelWorld,
        selection: &mut SelectionState,
    ) -> Option<Mutation> {
        match event {
            InputEvent::Destroy => self.destroy(camera, world),
            InputEvent::Place => self.place(camera, world, selection.current()),
            InputEvent::SelectSlot(key) => {
                self.select_slot(key, selection);
                None
            }
        }
    }

    fn destroy(&mut self, camera: &CameraPose, world: &mut VoxelWorld) -> Option<Mutation> {
        let Some(hit) = pick(camera.position, camera.forward, self.reach, world) else {
            log::trace!(target: "events", "destroy: nothing in reach");
            return None;
        };
        match world.remove(hit.coord) {
            Ok(v) => {
                log::info!(target: "events", "removed {} at {}", v.block(), hit.coord);
                self.feedback.push(Feedback::Destroyed {
                    coord: hit.coord,
                    block: v.block(),
                });
                Some(Mutation::Removed(hit.coord))
            }
            Err(e) => {
                log::debug!(target: "events", "destroy dropped: {}", e);
                None
            }
        }
    }

    fn place(
        &mut self,
        camera: &CameraPose,
        world: &mut VoxelWorld,
        held: Selection,
    ) -> Option<Mutation> {
        let Selection::Block(block) = held else {
            log::trace!(target: "events", "place: empty hand");
            return None;
        };
        let Some(hit) = pick(camera.position, camera.forward, self.reach, world) else {
            log::trace!(target: "events", "place: nothing in reach");
            return None;
        };
        let target = hit.adjacent();
        match world.insert(target, block) {
            Ok(()) => {
                log::info!(target: "events", "placed {} at {}", block, target);
                self.feedback.push(Feedback::Placed {
                    coord: target,
                    block,
                });
                Some(Mutation::Inserted(target, block))
            }
            Err(e) => {
                log::debug!(target: "events", "place dropped: {}", e);
                None
            }
        }
    }

    fn select_slot(&mut self, key: u8, selection: &mut SelectionState) {
        let Some(next) = self.hotbar.slot_for_key(key) else {
            log::debug!(target: "events", "no hotbar slot for key {}", key);
            return;
        };
        if selection.current() != next {
            selection.select(next);
            log::info!(target: "events", "holding {}", next);
            self.feedback.push(Feedback::SelectionChanged(next));
        }
    }
}
