use voxbox_geom::{Face, GridCoord, Vec3};
use voxbox_world::VoxelWorld;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Occupied cell the ray reached first.
    pub coord: GridCoord,
    /// Face the ray entered through; `None` when the ray started inside `coord`.
    pub face: Option<Face>,
    /// Ray parameter at which `coord` was entered.
    pub distance: f32,
}

impl RayHit {
    /// Outward unit normal of the entered face, or zero.
    #[inline]
    pub fn normal(&self) -> GridCoord {
        self.face.map(Face::offset).unwrap_or(GridCoord::ORIGIN)
    }

    /// Cell in front of the hit face, where a placed block goes.
    #[inline]
    pub fn adjacent(&self) -> GridCoord {
        self.coord + self.normal()
    }
}

/// Longest ray walked; longer reaches are cut to this.
pub const MAX_RAY_DISTANCE: f32 = 4096.0;

// Origins beyond this leave no headroom for stepping in i32 cells.
const MAX_ORIGIN_COORD: f32 = (1 << 30) as f32;

#[inline]
fn inv_or_max(v: f32) -> f32 {
    if v.abs() < 1e-8 { f32::MAX } else { 1.0 / v.abs() }
}

/// Exact grid traversal (Amanatides-Woo) over unit cells centred on integers.
///
/// Visits every cell the ray passes through in order, so no cell can be
/// skipped. Stops at the first cell for which `is_solid` holds, or once the
/// next cell would be entered beyond `max_dist` (at most [`MAX_RAY_DISTANCE`]).
pub fn raycast_first_hit_with_face<F>(
    origin: Vec3,
    dir: Vec3,
    max_dist: f32,
    mut is_solid: F,
) -> Option<RayHit>
where
    F: FnMut(GridCoord) -> bool,
{
    if !origin.is_finite() || !dir.is_finite() || !max_dist.is_finite() {
        return None;
    }
    if origin.x.abs() > MAX_ORIGIN_COORD
        || origin.y.abs() > MAX_ORIGIN_COORD
        || origin.z.abs() > MAX_ORIGIN_COORD
    {
        return None;
    }
    let max_dist = max_dist.min(MAX_RAY_DISTANCE);
    let len = dir.length();
    if len < 1e-6 {
        return None;
    }
    let d = dir / len;

    // Shift so cell boundaries sit on integers.
    let o = origin + Vec3::new(0.5, 0.5, 0.5);
    let mut vx = o.x.floor() as i32;
    let mut vy = o.y.floor() as i32;
    let mut vz = o.z.floor() as i32;

    let stepx = if d.x > 0.0 { 1 } else if d.x < 0.0 { -1 } else { 0 };
    let stepy = if d.y > 0.0 { 1 } else if d.y < 0.0 { -1 } else { 0 };
    let stepz = if d.z > 0.0 { 1 } else if d.z < 0.0 { -1 } else { 0 };

    let invx = inv_or_max(d.x);
    let invy = inv_or_max(d.y);
    let invz = inv_or_max(d.z);
    let tdx = if stepx == 0 { f32::MAX } else { invx };
    let tdy = if stepy == 0 { f32::MAX } else { invy };
    let tdz = if stepz == 0 { f32::MAX } else { invz };

    let fx = o.x - o.x.floor();
    let fy = o.y - o.y.floor();
    let fz = o.z - o.z.floor();
    let mut tmx = if stepx > 0 { (1.0 - fx) * invx } else if stepx < 0 { fx * invx } else { f32::MAX };
    let mut tmy = if stepy > 0 { (1.0 - fy) * invy } else if stepy < 0 { fy * invy } else { f32::MAX };
    let mut tmz = if stepz > 0 { (1.0 - fz) * invz } else if stepz < 0 { fz * invz } else { f32::MAX };

    let mut prev: Option<GridCoord> = None;
    let mut t = 0.0f32;
    // Each step crosses one boundary; a segment of length L crosses at most 3*(L+1).
    let max_steps = (max_dist.max(0.0).ceil() as usize).saturating_add(1).saturating_mul(3);

    for _ in 0..=max_steps {
        if t > max_dist {
            break;
        }
        let cur = GridCoord::new(vx, vy, vz);
        if is_solid(cur) {
            let face = prev.and_then(|p| Face::from_offset(p - cur));
            return Some(RayHit {
                coord: cur,
                face,
                distance: t,
            });
        }
        prev = Some(cur);
        // Step through smallest tMax
        if tmx < tmy {
            if tmx < tmz { vx += stepx; t = tmx; tmx += tdx; } else { vz += stepz; t = tmz; tmz += tdz; }
        } else {
            if tmy < tmz { vy += stepy; t = tmy; tmy += tdy; } else { vz += stepz; t = tmz; tmz += tdz; }
        }
    }
    None
}

/// Nearest occupied cell along the view ray within `max_distance`.
pub fn pick(origin: Vec3, direction: Vec3, max_distance: f32, world: &VoxelWorld) -> Option<RayHit> {
    raycast_first_hit_with_face(origin, direction, max_distance, |c| world.contains(c))
}
