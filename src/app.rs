use std::fmt;

use hashbrown::HashMap;
use voxbox_blocks::BlockType;
use voxbox_edit::{
    CameraPose, Feedback, Hotbar, InputEvent, InteractionController, Mutation, SelectionState,
};
use voxbox_geom::{Aabb, Vec3};
use voxbox_world::{VoxelWorld, WorldGenParams, initialize_world_with};

use crate::event::EventQueue;
use crate::script::Session;

const PLAYER_WIDTH: f32 = 0.6;
const PLAYER_HEIGHT: f32 = 1.8;
const EYE_HEIGHT: f32 = 1.62;
const SPAWN_CLIMB_LIMIT: usize = 256;

#[derive(Clone, Copy, Debug, Default)]
pub struct DebugStats {
    pub events: usize,
    pub inserted: usize,
    pub removed: usize,
    pub dropped: usize,
}

/// Headless viewer: owns the world and replays input against it.
pub struct App {
    pub world: VoxelWorld,
    pub selection: SelectionState,
    pub controller: InteractionController,
    pub queue: EventQueue,
    pub camera: CameraPose,
    pub debug_stats: DebugStats,
}

impl App {
    pub fn new(params: &WorldGenParams, hotbar: Hotbar, reach: f32) -> Self {
        let world = initialize_world_with(params);
        let camera = spawn_camera(&world, params);
        log::info!(
            "spawn eye at ({:.1}, {:.1}, {:.1})",
            camera.position.x,
            camera.position.y,
            camera.position.z
        );
        Self {
            world,
            selection: SelectionState::default(),
            controller: InteractionController::new(hotbar, reach),
            queue: EventQueue::new(),
            camera,
            debug_stats: DebugStats::default(),
        }
    }

    /// Drains this tick's events in arrival order, then advances the tick.
    pub fn step(&mut self) -> Vec<Mutation> {
        let mut applied = Vec::new();
        while let Some(env) = self.queue.pop_ready() {
            self.debug_stats.events += 1;
            Self::log_event(env.id, env.tick, &env.kind);
            let m = self.controller.handle_input(
                env.kind,
                &self.camera,
                &mut self.world,
                &mut self.selection,
            );
            match m {
                Some(m) => {
                    match m {
                        Mutation::Inserted(..) => self.debug_stats.inserted += 1,
                        Mutation::Removed(_) => self.debug_stats.removed += 1,
                    }
                    log::info!(
                        target: "events",
                        "[tick {}] applied {:?} rev={}",
                        env.tick,
                        m,
                        self.world.rev()
                    );
                    applied.push(m);
                }
                None if !matches!(env.kind, InputEvent::SelectSlot(_)) => {
                    self.debug_stats.dropped += 1;
                }
                None => {}
            }
        }
        for fb in self.controller.drain_feedback() {
            Self::log_feedback(self.queue.now, &fb);
        }
        self.queue.advance_tick();
        applied
    }

    /// Queues every frame's events at its own tick, starting at the current one.
    pub fn schedule_session(&mut self, session: &Session) {
        let start = self.queue.now;
        for (i, frame) in session.frames.iter().enumerate() {
            for ev in &frame.events {
                self.queue.emit_at(start + i as u64, *ev);
            }
        }
    }

    /// One frame per tick: move the camera, then step.
    pub fn run_session(&mut self, session: &Session) -> Vec<Mutation> {
        self.schedule_session(session);
        let mut all = Vec::new();
        for frame in &session.frames {
            self.camera = frame.camera.into();
            all.extend(self.step());
        }
        all
    }

    pub fn summary(&self) -> Summary {
        let mut visible: HashMap<BlockType, usize> = HashMap::new();
        self.world.for_each_visible(|_, b| *visible.entry(b).or_insert(0) += 1);
        Summary {
            total: self.world.len(),
            rev: self.world.rev(),
            visible,
            stats: self.debug_stats,
            pending: self.queue.pending(),
        }
    }

    fn log_event(id: u64, tick: u64, ev: &InputEvent) {
        match ev {
            InputEvent::Destroy => {
                log::debug!(target: "events", "[tick {}] #{} Destroy", tick, id)
            }
            InputEvent::Place => log::debug!(target: "events", "[tick {}] #{} Place", tick, id),
            InputEvent::SelectSlot(k) => {
                log::debug!(target: "events", "[tick {}] #{} SelectSlot key={}", tick, id, k)
            }
        }
    }

    fn log_feedback(tick: u64, fb: &Feedback) {
        match fb {
            Feedback::Destroyed { coord, block } => {
                log::trace!(target: "events", "[tick {}] punch: {} broken at {}", tick, block, coord)
            }
            Feedback::Placed { coord, block } => {
                log::trace!(target: "events", "[tick {}] punch: {} set at {}", tick, block, coord)
            }
            Feedback::SelectionChanged(s) => {
                log::trace!(target: "events", "[tick {}] hand shows {}", tick, s)
            }
        }
    }
}

/// Eye above the middle column, raised until the player box is clear.
fn spawn_camera(world: &VoxelWorld, params: &WorldGenParams) -> CameraPose {
    let b = params.bounds;
    let x = b.min_x + (b.max_x - b.min_x) / 2;
    let z = b.min_z + (b.max_z - b.min_z) / 2;
    let surface = world.surface_height(x, z).unwrap_or(params.min_height);
    let mut feet = Vec3::new(x as f32, surface as f32 + 0.5, z as f32);
    for _ in 0..SPAWN_CLIMB_LIMIT {
        if !world.aabb_collides(&Aabb::from_feet(feet, PLAYER_WIDTH, PLAYER_HEIGHT)) {
            break;
        }
        feet.y += 1.0;
    }
    CameraPose::new(
        feet + Vec3::new(0.0, EYE_HEIGHT, 0.0),
        Vec3::new(0.0, -0.6, 1.0),
    )
}

pub struct Summary {
    pub total: usize,
    pub rev: u64,
    pub visible: HashMap<BlockType, usize>,
    pub stats: DebugStats,
    /// Events still waiting for a later tick.
    pub pending: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "voxels: {} (rev {})", self.total, self.rev)?;
        for b in BlockType::ALL {
            let n = self.visible.get(&b).copied().unwrap_or(0);
            writeln!(f, "  visible {:<8} {}", b.name(), n)?;
        }
        write!(
            f,
            "events: {} inserted: {} removed: {} dropped: {} pending: {}",
            self.stats.events,
            self.stats.inserted,
            self.stats.removed,
            self.stats.dropped,
            self.pending
        )
    }
}
