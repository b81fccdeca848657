//! Picking and the place/destroy interaction loop.
#![forbid(unsafe_code)]

pub mod controller;
pub mod raycast;
pub mod selection;

pub use controller::{
    CameraPose, DEFAULT_REACH, Feedback, InputEvent, InteractionController, Mutation,
};
pub use raycast::{MAX_RAY_DISTANCE, RayHit, pick, raycast_first_hit_with_face};
pub use selection::{HOTBAR_SLOTS, Hotbar, SelectionState};
