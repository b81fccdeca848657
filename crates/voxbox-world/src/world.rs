use hashbrown::HashMap;
use thiserror::Error;
use voxbox_blocks::BlockType;
use voxbox_geom::{Aabb, GridCoord};

/// Why a grid mutation had no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("cell {0} is already occupied")]
    Occupied(GridCoord),
    #[error("cell {0} is empty")]
    Empty(GridCoord),
    #[error("block at {0} cannot be removed")]
    Indestructible(GridCoord),
}

/// One placed block. Removability is fixed when the voxel is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Voxel {
    coord: GridCoord,
    block: BlockType,
    removable: bool,
}

impl Voxel {
    fn new(coord: GridCoord, block: BlockType) -> Self {
        Self {
            coord,
            block,
            removable: block.is_removable(),
        }
    }

    #[inline]
    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    #[inline]
    pub fn block(&self) -> BlockType {
        self.block
    }

    #[inline]
    pub fn removable(&self) -> bool {
        self.removable
    }
}

/// Sparse block grid. Absent cells are air.
#[derive(Clone, Debug, Default)]
pub struct VoxelWorld {
    cells: HashMap<GridCoord, Voxel>,
    // Bumped once per successful insert/remove
    counter: u64,
}

impl VoxelWorld {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, c: GridCoord) -> Option<&Voxel> {
        self.cells.get(&c)
    }

    #[inline]
    pub fn contains(&self, c: GridCoord) -> bool {
        self.cells.contains_key(&c)
    }

    #[inline]
    pub fn block_at(&self, c: GridCoord) -> Option<BlockType> {
        self.cells.get(&c).map(Voxel::block)
    }

    /// Places `block` at an empty cell. Never overwrites.
    pub fn insert(&mut self, c: GridCoord, block: BlockType) -> Result<(), Rejected> {
        match self.cells.entry(c) {
            hashbrown::hash_map::Entry::Occupied(_) => Err(Rejected::Occupied(c)),
            hashbrown::hash_map::Entry::Vacant(v) => {
                v.insert(Voxel::new(c, block));
                self.bump();
                Ok(())
            }
        }
    }

    /// Frees an occupied cell unless its voxel is indestructible.
    pub fn remove(&mut self, c: GridCoord) -> Result<Voxel, Rejected> {
        match self.cells.get(&c) {
            None => Err(Rejected::Empty(c)),
            Some(v) if !v.removable => Err(Rejected::Indestructible(c)),
            Some(_) => {
                let v = self.cells.remove(&c).ok_or(Rejected::Empty(c))?;
                self.bump();
                Ok(v)
            }
        }
    }

    #[inline]
    fn bump(&mut self) {
        self.counter = self.counter.wrapping_add(1).max(1);
    }

    /// Revision stamp; changes after every successful mutation.
    #[inline]
    pub fn rev(&self) -> u64 {
        self.counter
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Voxel> + '_ {
        self.cells.values()
    }

    /// All voxels as `(coord, block)`, sorted by coordinate.
    pub fn sorted_cells(&self) -> Vec<(GridCoord, BlockType)> {
        let mut out: Vec<_> = self.cells.values().map(|v| (v.coord, v.block)).collect();
        out.sort_unstable();
        out
    }

    /// Highest occupied y in column `(x, z)`.
    pub fn surface_height(&self, x: i32, z: i32) -> Option<i32> {
        self.cells
            .keys()
            .filter(|c| c.x == x && c.z == z)
            .map(|c| c.y)
            .max()
    }

    /// A voxel is visible when at least one face neighbour is air.
    pub fn is_visible(&self, c: GridCoord) -> bool {
        self.contains(c) && c.neighbors().iter().any(|n| !self.contains(*n))
    }

    /// Render callback: invoked once per visible voxel.
    pub fn for_each_visible<F>(&self, mut f: F)
    where
        F: FnMut(GridCoord, BlockType),
    {
        for v in self.cells.values() {
            if v.coord.neighbors().iter().any(|n| !self.contains(*n)) {
                f(v.coord, v.block);
            }
        }
    }

    /// True when `b` strictly overlaps any solid cell.
    pub fn aabb_collides(&self, b: &Aabb) -> bool {
        // Cell c overlaps [lo, hi] on an axis iff lo - 0.5 < c < hi + 0.5
        let lo = |v: f32| (v - 0.5).floor() as i32 + 1;
        let hi = |v: f32| (v + 0.5).ceil() as i32 - 1;
        for y in lo(b.min.y)..=hi(b.max.y) {
            for z in lo(b.min.z)..=hi(b.max.z) {
                for x in lo(b.min.x)..=hi(b.max.x) {
                    if self
                        .block_at(GridCoord::new(x, y, z))
                        .is_some_and(BlockType::is_solid)
                    {
                        return true;
                    }
                }
            }
        }
        false
    }
}
