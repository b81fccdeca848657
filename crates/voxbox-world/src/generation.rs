use std::time::Instant;

use rayon::prelude::*;
use voxbox_blocks::BlockType;
use voxbox_geom::GridCoord;

use crate::noise::NoiseField;
use crate::world::VoxelWorld;
use crate::worldgen::{ColumnBounds, WorldGenParams};

/// Block for layer `y` of a column spanning `min_y..=surface`.
///
/// Bedrock wins over grass when the column is a single cell tall.
pub fn layer_block(y: i32, min_y: i32, surface: i32) -> BlockType {
    if y == min_y {
        BlockType::Bedrock
    } else if y == surface {
        BlockType::Grass
    } else if y < surface - 1 {
        BlockType::Stone
    } else {
        BlockType::Dirt
    }
}

#[derive(Clone, Copy, Debug)]
struct ColumnPlan {
    x: i32,
    z: i32,
    surface: i32,
}

/// Turns the noise field into filled block columns.
pub struct TerrainGenerator {
    noise: NoiseField,
    params: WorldGenParams,
}

impl TerrainGenerator {
    pub fn new(params: WorldGenParams) -> Self {
        Self {
            noise: NoiseField::from_params(&params),
            params,
        }
    }

    #[inline]
    pub fn params(&self) -> &WorldGenParams {
        &self.params
    }

    #[inline]
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Surface y for column `(x, z)`; never below the bedrock layer.
    pub fn surface_height(&self, x: i32, z: i32) -> i32 {
        let p = &self.params;
        let sample = self.noise.sample(x as f32 * p.scale, z as f32 * p.scale);
        let h = (sample * p.amplitude).floor() as i32 + p.base_height;
        h.max(p.min_height)
    }

    /// Cells of column `(x, z)` from bedrock up to the surface.
    pub fn column(&self, x: i32, z: i32) -> Vec<(GridCoord, BlockType)> {
        self.column_from_surface(x, z, self.surface_height(x, z))
    }

    fn column_from_surface(&self, x: i32, z: i32, surface: i32) -> Vec<(GridCoord, BlockType)> {
        let min_y = self.params.min_height;
        (min_y..=surface)
            .map(|y| (GridCoord::new(x, y, z), layer_block(y, min_y, surface)))
            .collect()
    }

    pub fn generate(&self, bounds: ColumnBounds) -> VoxelWorld {
        let mut world = VoxelWorld::new();
        self.generate_into(bounds, &mut world);
        world
    }

    /// Fills every column in `bounds`. Heights are sampled in parallel; all
    /// writes land before this returns. Returns the number of voxels placed.
    pub fn generate_into(&self, bounds: ColumnBounds, world: &mut VoxelWorld) -> usize {
        if bounds.is_empty() {
            log::warn!(target: "worldgen", "empty bounds {:?}; nothing generated", bounds);
            return 0;
        }
        let t0 = Instant::now();
        let cols: Vec<(i32, i32)> = bounds.columns().collect();
        let plans: Vec<ColumnPlan> = cols
            .par_iter()
            .map(|&(x, z)| ColumnPlan {
                x,
                z,
                surface: self.surface_height(x, z),
            })
            .collect();

        let mut placed = 0usize;
        let mut skipped = 0usize;
        for plan in &plans {
            for (c, block) in self.column_from_surface(plan.x, plan.z, plan.surface) {
                match world.insert(c, block) {
                    Ok(()) => placed += 1,
                    Err(_) => skipped += 1,
                }
            }
        }
        if skipped > 0 {
            log::warn!(
                target: "worldgen",
                "{} generated cells were already occupied and left as-is",
                skipped
            );
        }
        log::info!(
            target: "worldgen",
            "generated {} columns, {} voxels (seed={}) in {:?}",
            plans.len(),
            placed,
            self.params.seed,
            t0.elapsed()
        );
        placed
    }
}

/// One-shot world creation with default shape parameters.
pub fn initialize_world(seed: i32, bounds: ColumnBounds, base_height: i32) -> VoxelWorld {
    let params = WorldGenParams {
        seed,
        bounds,
        base_height,
        ..WorldGenParams::default()
    };
    initialize_world_with(&params)
}

pub fn initialize_world_with(params: &WorldGenParams) -> VoxelWorld {
    TerrainGenerator::new(params.clone()).generate(params.bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_cell_column_is_bedrock() {
        assert_eq!(layer_block(0, 0, 0), BlockType::Bedrock);
    }

    #[test]
    fn two_cell_column_is_bedrock_then_grass() {
        assert_eq!(layer_block(0, 0, 1), BlockType::Bedrock);
        assert_eq!(layer_block(1, 0, 1), BlockType::Grass);
    }

    #[test]
    fn three_cell_column_has_one_dirt() {
        let ys: Vec<_> = (0..=2).map(|y| layer_block(y, 0, 2)).collect();
        assert_eq!(
            ys,
            vec![BlockType::Bedrock, BlockType::Dirt, BlockType::Grass]
        );
    }

    #[test]
    fn surface_clamped_to_bedrock_layer() {
        let g = TerrainGenerator::new(WorldGenParams {
            base_height: -50,
            min_height: 0,
            ..WorldGenParams::default()
        });
        assert_eq!(g.surface_height(3, 4), 0);
        assert_eq!(g.column(3, 4), vec![(GridCoord::new(3, 0, 4), BlockType::Bedrock)]);
    }
}
