use std::fmt;

use serde::Deserialize;

/// Closed set of block kinds. Type-specific rules live in [`BlockProps`], not
/// in per-kind behaviour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Bedrock = 0,
    Stone = 1,
    Dirt = 2,
    Grass = 3,
    Brick = 4,
}

/// Static rules for one block kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockProps {
    pub name: &'static str,
    pub removable: bool,
    pub solid: bool,
    /// Key the render collaborator binds a texture/material to.
    pub material: &'static str,
}

const PROPS: [BlockProps; 5] = [
    BlockProps {
        name: "bedrock",
        removable: false,
        solid: true,
        material: "bedrock_block",
    },
    BlockProps {
        name: "stone",
        removable: true,
        solid: true,
        material: "stone_block",
    },
    BlockProps {
        name: "dirt",
        removable: true,
        solid: true,
        material: "dirt_block",
    },
    BlockProps {
        name: "grass",
        removable: true,
        solid: true,
        material: "grass_block",
    },
    BlockProps {
        name: "brick",
        removable: true,
        solid: true,
        material: "brick_block",
    },
];

impl BlockType {
    pub const ALL: [BlockType; 5] = [
        BlockType::Bedrock,
        BlockType::Stone,
        BlockType::Dirt,
        BlockType::Grass,
        BlockType::Brick,
    ];

    #[inline]
    pub fn props(self) -> &'static BlockProps {
        &PROPS[self as usize]
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.props().name
    }

    #[inline]
    pub fn is_removable(self) -> bool {
        self.props().removable
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        self.props().solid
    }

    pub fn from_name(name: &str) -> Option<BlockType> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the viewer is holding: a block to place, or nothing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    Block(BlockType),
    #[default]
    EmptyHand,
}

impl Selection {
    #[inline]
    pub fn block(self) -> Option<BlockType> {
        match self {
            Selection::Block(b) => Some(b),
            Selection::EmptyHand => None,
        }
    }

    #[inline]
    pub fn is_empty_hand(self) -> bool {
        matches!(self, Selection::EmptyHand)
    }
}

impl From<BlockType> for Selection {
    fn from(b: BlockType) -> Self {
        Selection::Block(b)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Block(b) => write!(f, "{b}"),
            Selection::EmptyHand => f.write_str("empty hand"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_line_up_with_discriminants() {
        for b in BlockType::ALL {
            assert_eq!(BlockType::from_name(b.props().name), Some(b));
        }
    }

    #[test]
    fn only_bedrock_is_indestructible() {
        let fixed: Vec<_> = BlockType::ALL
            .into_iter()
            .filter(|b| !b.is_removable())
            .collect();
        assert_eq!(fixed, vec![BlockType::Bedrock]);
    }
}
