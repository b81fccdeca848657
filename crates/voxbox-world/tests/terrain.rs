use voxbox_blocks::BlockType;
use voxbox_geom::GridCoord;
use voxbox_world::{
    ColumnBounds, NoiseField, TerrainGenerator, WorldGenParams, initialize_world,
    initialize_world_with,
};

fn flat_params(bounds: ColumnBounds, base_height: i32) -> WorldGenParams {
    WorldGenParams {
        bounds,
        base_height,
        min_height: 0,
        amplitude: 0.0,
        ..WorldGenParams::default()
    }
}

#[test]
fn same_seed_generates_identical_worlds() {
    let bounds = ColumnBounds::new(-8, 8, -8, 8);
    let a = initialize_world(99, bounds, 6);
    let b = initialize_world(99, bounds, 6);
    assert!(!a.is_empty());
    assert_eq!(a.sorted_cells(), b.sorted_cells());
}

#[test]
fn different_seeds_change_the_heightmap() {
    let mk = |seed| {
        TerrainGenerator::new(WorldGenParams {
            seed,
            amplitude: 8.0,
            ..WorldGenParams::default()
        })
    };
    let (a, b) = (mk(1), mk(2));
    let differing = ColumnBounds::new(0, 32, 0, 32)
        .columns()
        .filter(|&(x, z)| a.surface_height(x, z) != b.surface_height(x, z))
        .count();
    assert!(differing > 32, "only {differing} columns differ");
}

#[test]
fn noise_stays_in_unit_range() {
    let n = NoiseField::new(5, 6, 0.5, 2.0);
    for i in -200..200 {
        let v = n.sample(i as f32 * 0.173, i as f32 * -0.311 + 7.0);
        assert!((-1.0..=1.0).contains(&v), "sample {v} out of range");
    }
}

#[test]
fn every_column_is_a_full_stack_following_the_layer_rule() {
    let params = WorldGenParams {
        seed: 4242,
        bounds: ColumnBounds::new(-6, 6, -6, 6),
        amplitude: 6.0,
        ..WorldGenParams::default()
    };
    let generator = TerrainGenerator::new(params.clone());
    let world = generator.generate(params.bounds);
    let min = params.min_height;
    let mut expected = 0;
    for (x, z) in params.bounds.columns() {
        let surface = generator.surface_height(x, z);
        assert!(surface >= min);
        assert_eq!(world.surface_height(x, z), Some(surface));
        for y in min..=surface {
            let got = world.block_at(GridCoord::new(x, y, z));
            let want = if y == min {
                BlockType::Bedrock
            } else if y == surface {
                BlockType::Grass
            } else if surface - y == 1 {
                BlockType::Dirt
            } else {
                BlockType::Stone
            };
            assert_eq!(got, Some(want), "column ({x},{z}) y={y} surface={surface}");
            expected += 1;
        }
        assert!(!world.contains(GridCoord::new(x, surface + 1, z)));
        assert!(!world.contains(GridCoord::new(x, min - 1, z)));
    }
    assert_eq!(world.len(), expected);
}

#[test]
fn flat_single_column_matches_expected_stack() {
    let params = flat_params(ColumnBounds::column(0, 0), 5);
    let world = initialize_world_with(&params);
    assert_eq!(
        world.sorted_cells(),
        vec![
            (GridCoord::new(0, 0, 0), BlockType::Bedrock),
            (GridCoord::new(0, 1, 0), BlockType::Stone),
            (GridCoord::new(0, 2, 0), BlockType::Stone),
            (GridCoord::new(0, 3, 0), BlockType::Stone),
            (GridCoord::new(0, 4, 0), BlockType::Dirt),
            (GridCoord::new(0, 5, 0), BlockType::Grass),
        ]
    );
}

#[test]
fn surface_equal_to_bedrock_layer_is_bedrock() {
    let params = flat_params(ColumnBounds::column(2, -3), 0);
    let world = initialize_world_with(&params);
    assert_eq!(
        world.sorted_cells(),
        vec![(GridCoord::new(2, 0, -3), BlockType::Bedrock)]
    );
}

#[test]
fn generated_bedrock_cannot_be_removed() {
    let params = flat_params(ColumnBounds::new(0, 3, 0, 3), 2);
    let mut world = initialize_world_with(&params);
    for (x, z) in params.bounds.columns() {
        let c = GridCoord::new(x, 0, z);
        assert!(world.remove(c).is_err());
        assert!(!world.get(c).unwrap().removable());
        // Digging down to bedrock still leaves it in place
        world.remove(GridCoord::new(x, 2, z)).unwrap();
        world.remove(GridCoord::new(x, 1, z)).unwrap();
        assert!(world.remove(c).is_err());
        assert_eq!(world.block_at(c), Some(BlockType::Bedrock));
    }
}

#[test]
fn empty_bounds_generate_nothing() {
    let world = initialize_world(1, ColumnBounds::new(4, 4, 0, 10), 5);
    assert!(world.is_empty());
}

#[test]
fn only_exposed_voxels_reach_the_render_callback() {
    // 3x3 flat slab, three layers: the buried centre of the middle layer is hidden
    let params = flat_params(ColumnBounds::new(0, 3, 0, 3), 2);
    let world = initialize_world_with(&params);
    let mut seen = Vec::new();
    world.for_each_visible(|c, b| seen.push((c, b)));
    assert_eq!(seen.len(), world.len() - 1);
    let hidden = GridCoord::new(1, 1, 1);
    assert!(!world.is_visible(hidden));
    assert!(seen.iter().all(|(c, _)| *c != hidden));
}
