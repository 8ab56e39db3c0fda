//! World Components
//!
//! Read-only views of the objects the engine sees through the world facade:
//! positions, sources, construction sites, the spawn, the controller, flags
//! and ground energy piles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a world object
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A tile position inside the colony's room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance, the number of single-tile moves between two tiles
    pub fn range_to(&self, other: Position) -> u32 {
        (self.x - other.x).unsigned_abs().max((self.y - other.y).unsigned_abs())
    }

    /// True when the two tiles touch (or coincide)
    pub fn is_near_to(&self, other: Position) -> bool {
        self.range_to(other) <= 1
    }

    pub fn in_range_to(&self, other: Position, range: u32) -> bool {
        self.range_to(other) <= range
    }

    /// The neighbouring tile one step closer to `target`
    pub fn step_toward(&self, target: Position) -> Position {
        Position {
            x: self.x + (target.x - self.x).signum(),
            y: self.y + (target.y - self.y).signum(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An inclusive rectangle of tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Area {
    /// Square area of `radius` tiles around `center` (radius 1 gives 3x3)
    pub fn around(center: Position, radius: u32) -> Self {
        let r = radius as i32;
        Self {
            top: center.y - r,
            left: center.x - r,
            bottom: center.y + r,
            right: center.x + r,
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.left && pos.x <= self.right && pos.y >= self.top && pos.y <= self.bottom
    }
}

/// An energy source that agents extract from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: ObjectId,
    pub pos: Position,
    pub energy: u32,
    pub energy_capacity: u32,
}

impl Source {
    /// Active sources still have energy to extract
    pub fn is_active(&self) -> bool {
        self.energy > 0
    }
}

/// A structure under construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionSite {
    pub id: ObjectId,
    pub pos: Position,
    pub progress: u32,
    pub progress_total: u32,
}

impl ConstructionSite {
    pub fn is_complete(&self) -> bool {
        self.progress >= self.progress_total
    }
}

/// The spawning facility, which is also the colony's energy storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub id: ObjectId,
    pub name: String,
    pub pos: Position,
    pub energy: u32,
    pub energy_capacity: u32,
    pub hits: u32,
    pub hits_max: u32,
}

impl Spawn {
    pub fn is_full(&self) -> bool {
        self.energy >= self.energy_capacity
    }
}

/// The room controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controller {
    pub id: ObjectId,
    pub pos: Position,
    pub level: u8,
    pub progress: u32,
    pub progress_total: u32,
}

/// A named marker placed by the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    pub id: ObjectId,
    pub name: String,
    pub pos: Position,
}

/// Energy lying on the ground; not individually tracked between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyPile {
    pub pos: Position,
    pub amount: u32,
}

/// Anything an identifier can resolve to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldObject {
    Source(Source),
    ConstructionSite(ConstructionSite),
    Spawn(Spawn),
    Controller(Controller),
    Flag(Flag),
}

impl WorldObject {
    pub fn id(&self) -> &ObjectId {
        match self {
            WorldObject::Source(s) => &s.id,
            WorldObject::ConstructionSite(s) => &s.id,
            WorldObject::Spawn(s) => &s.id,
            WorldObject::Controller(c) => &c.id,
            WorldObject::Flag(f) => &f.id,
        }
    }

    pub fn pos(&self) -> Position {
        match self {
            WorldObject::Source(s) => s.pos,
            WorldObject::ConstructionSite(s) => s.pos,
            WorldObject::Spawn(s) => s.pos,
            WorldObject::Controller(c) => c.pos,
            WorldObject::Flag(f) => f.pos,
        }
    }

    /// Storage facilities accept energy transfers
    pub fn is_storage(&self) -> bool {
        matches!(self, WorldObject::Spawn(_))
    }

    pub fn as_source(&self) -> Option<&Source> {
        match self {
            WorldObject::Source(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_construction_site(&self) -> Option<&ConstructionSite> {
        match self {
            WorldObject::ConstructionSite(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_chebyshev() {
        let a = Position::new(10, 10);
        assert_eq!(a.range_to(Position::new(13, 11)), 3);
        assert_eq!(a.range_to(Position::new(9, 9)), 1);
        assert_eq!(a.range_to(a), 0);
    }

    #[test]
    fn test_is_near_to() {
        let a = Position::new(5, 5);
        assert!(a.is_near_to(Position::new(6, 6)));
        assert!(a.is_near_to(a));
        assert!(!a.is_near_to(Position::new(7, 5)));
    }

    #[test]
    fn test_step_toward() {
        let a = Position::new(5, 5);
        assert_eq!(a.step_toward(Position::new(9, 2)), Position::new(6, 4));
        assert_eq!(a.step_toward(Position::new(5, 8)), Position::new(5, 6));
        assert_eq!(a.step_toward(a), a);
    }

    #[test]
    fn test_area_around_is_three_by_three() {
        let area = Area::around(Position::new(20, 30), 1);
        assert_eq!(area, Area { top: 29, left: 19, bottom: 31, right: 21 });
        assert!(area.contains(Position::new(21, 31)));
        assert!(!area.contains(Position::new(22, 30)));
    }

    #[test]
    fn test_storage_classification() {
        let spawn = WorldObject::Spawn(Spawn {
            id: "spawn-HQ".into(),
            name: "HQ".into(),
            pos: Position::new(1, 1),
            energy: 0,
            energy_capacity: 300,
            hits: 5000,
            hits_max: 5000,
        });
        let flag = WorldObject::Flag(Flag {
            id: "flag-muleDrop".into(),
            name: "muleDrop".into(),
            pos: Position::new(2, 2),
        });
        assert!(spawn.is_storage());
        assert!(!flag.is_storage());
    }

    #[test]
    fn test_site_completion() {
        let mut site = ConstructionSite {
            id: "site-1".into(),
            pos: Position::new(0, 0),
            progress: 2999,
            progress_total: 3000,
        };
        assert!(!site.is_complete());
        site.progress = 3000;
        assert!(site.is_complete());
    }
}
