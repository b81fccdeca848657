//! Minimal geometry types shared by the world and edit crates.
//!
//! Grid cells are unit cubes centred on integer coordinates: cell `(x, y, z)`
//! spans `[x - 0.5, x + 0.5]` on each axis.
#![forbid(unsafe_code)]

use core::fmt;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const UP: Vec3 = Vec3 {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, rhs: Vec3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len > 0.0 { self / len } else { self }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Vec3 {
    #[inline]
    fn from(v: [f32; 3]) -> Self {
        Vec3::new(v[0], v[1], v[2])
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn div(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of the given full extents whose bottom face is centred on `feet`.
    pub fn from_feet(feet: Vec3, width: f32, height: f32) -> Self {
        let r = width * 0.5;
        Self {
            min: Vec3::new(feet.x - r, feet.y, feet.z - r),
            max: Vec3::new(feet.x + r, feet.y + height, feet.z + r),
        }
    }

    /// Unit cube occupied by a grid cell.
    pub fn of_cell(c: GridCoord) -> Self {
        let center = c.center();
        Self {
            min: center - Vec3::new(0.5, 0.5, 0.5),
            max: center + Vec3::new(0.5, 0.5, 0.5),
        }
    }

    #[inline]
    pub fn translated(self, by: Vec3) -> Self {
        Self {
            min: self.min + by,
            max: self.max + by,
        }
    }

    /// Strict overlap: boxes that only touch on a face do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }
}

/// Integer cell address in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridCoord {
    pub const ORIGIN: GridCoord = GridCoord { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Nearest cell to a point; ties on a cell boundary go to the positive side.
    #[inline]
    pub fn from_point(p: Vec3) -> Self {
        Self {
            x: (p.x + 0.5).floor() as i32,
            y: (p.y + 0.5).floor() as i32,
            z: (p.z + 0.5).floor() as i32,
        }
    }

    #[inline]
    pub fn center(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    #[inline]
    pub fn offset(self, face: Face) -> GridCoord {
        self + face.offset()
    }

    /// The six face-adjacent cells, in `Face::ALL` order.
    pub fn neighbors(self) -> [GridCoord; 6] {
        Face::ALL.map(|f| self.offset(f))
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for GridCoord {
    #[inline]
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        GridCoord::new(x, y, z)
    }
}

impl Add for GridCoord {
    type Output = GridCoord;
    #[inline]
    fn add(self, rhs: GridCoord) -> GridCoord {
        GridCoord::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for GridCoord {
    type Output = GridCoord;
    #[inline]
    fn sub(self, rhs: GridCoord) -> GridCoord {
        GridCoord::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for GridCoord {
    type Output = GridCoord;
    #[inline]
    fn neg(self) -> GridCoord {
        GridCoord::new(-self.x, -self.y, -self.z)
    }
}

/// Axis-aligned cube face, identified by its outward normal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosY = 0,
    NegY = 1,
    PosX = 2,
    NegX = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosY,
        Face::NegY,
        Face::PosX,
        Face::NegX,
        Face::PosZ,
        Face::NegZ,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn offset(self) -> GridCoord {
        match self {
            Face::PosY => GridCoord::new(0, 1, 0),
            Face::NegY => GridCoord::new(0, -1, 0),
            Face::PosX => GridCoord::new(1, 0, 0),
            Face::NegX => GridCoord::new(-1, 0, 0),
            Face::PosZ => GridCoord::new(0, 0, 1),
            Face::NegZ => GridCoord::new(0, 0, -1),
        }
    }

    #[inline]
    pub fn normal(self) -> Vec3 {
        self.offset().center()
    }

    #[inline]
    pub fn opposite(self) -> Face {
        match self {
            Face::PosY => Face::NegY,
            Face::NegY => Face::PosY,
            Face::PosX => Face::NegX,
            Face::NegX => Face::PosX,
            Face::PosZ => Face::NegZ,
            Face::NegZ => Face::PosZ,
        }
    }

    /// Face whose normal is the given unit step, if it is one.
    pub fn from_offset(d: GridCoord) -> Option<Face> {
        Face::ALL.into_iter().find(|f| f.offset() == d)
    }
}
