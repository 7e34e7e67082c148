//! Vertex and edge slots and the handles tiles use to reach them.

use super::PlayerId;
use crate::structure::{Augments, Structure};
use serde::{Deserialize, Serialize};

/// Handle of a corner slot in the board's canonical store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub(crate) u32);

/// Handle of a side slot in the board's canonical store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub(crate) u32);

impl VertexId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What's built on a corner or side
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Slot {
    /// Nothing built
    #[default]
    Empty,
    /// A structure, plus any extensions built on top of it
    Occupied {
        structure: Structure,
        extensions: Vec<Structure>,
    },
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// The base structure in this slot
    pub fn structure(&self) -> Option<&Structure> {
        match self {
            Slot::Empty => None,
            Slot::Occupied { structure, .. } => Some(structure),
        }
    }

    pub fn extensions(&self) -> &[Structure] {
        match self {
            Slot::Empty => &[],
            Slot::Occupied { extensions, .. } => extensions,
        }
    }

    /// Get the owner of this slot, if any
    pub fn owner(&self) -> Option<PlayerId> {
        self.structure().map(|s| s.owner)
    }

    /// Resources produced per matching roll, extensions included
    pub fn total_yield(&self) -> u32 {
        self.structure()
            .into_iter()
            .chain(self.extensions())
            .map(|s| s.kind.base_yield)
            .sum()
    }

    /// Victory points provided by this slot, extensions included
    pub fn point_value(&self) -> u32 {
        self.structure()
            .into_iter()
            .chain(self.extensions())
            .map(|s| s.kind.point_value)
            .sum()
    }

    /// Write a validated structure into the slot.
    ///
    /// Upgrades replace the standing structure, extensions are appended and
    /// anything else fills the empty slot.
    pub(crate) fn set(&mut self, new: Structure) {
        let upgrade = matches!(new.kind.augments, Augments::Upgrade { .. });
        let extension = matches!(new.kind.augments, Augments::Extension { .. });

        *self = match std::mem::take(self) {
            Slot::Occupied { extensions, .. } if upgrade => Slot::Occupied {
                structure: new,
                extensions,
            },
            Slot::Occupied {
                structure,
                mut extensions,
            } if extension => {
                extensions.push(new);
                Slot::Occupied {
                    structure,
                    extensions,
                }
            }
            _ => Slot::Occupied {
                structure: new,
                extensions: Vec::new(),
            },
        };
    }
}
