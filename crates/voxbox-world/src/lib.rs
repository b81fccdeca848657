//! Voxel grid, noise field, and terrain generation.
#![forbid(unsafe_code)]

pub mod generation;
pub mod noise;
pub mod world;
pub mod worldgen;

pub use generation::{TerrainGenerator, initialize_world, initialize_world_with, layer_block};
pub use noise::NoiseField;
pub use world::{Rejected, Voxel, VoxelWorld};
pub use worldgen::{ColumnBounds, WorldGenConfig, WorldGenParams, load_params_from_path};
