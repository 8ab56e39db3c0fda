//! Energy Logistics
//!
//! The shared ground-pile scan used by Mules, Builders and Priests, and the
//! policy that picks one pile when several are found.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::components::{Area, EnergyPile, Position};
use crate::config::PileSelection;
use crate::facade::ColonyWorld;

/// Ground energy piles within `radius` tiles of `center`
pub fn energy_piles_near<W: ColonyWorld + ?Sized>(
    world: &W,
    center: Position,
    radius: u32,
) -> Vec<EnergyPile> {
    world
        .energy_in_area(Area::around(center, radius))
        .into_iter()
        .filter(|pile| pile.amount > 0)
        .collect()
}

/// Picks one pile out of a scan result
pub trait PileSelector {
    fn choose(&mut self, piles: &[EnergyPile]) -> Option<EnergyPile>;
}

/// Uniform choice driven by a seeded generator
#[derive(Debug, Clone)]
pub struct RandomPile {
    rng: SmallRng,
}

impl RandomPile {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl PileSelector for RandomPile {
    fn choose(&mut self, piles: &[EnergyPile]) -> Option<EnergyPile> {
        piles.choose(&mut self.rng).copied()
    }
}

/// Always the first pile in scan order
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPile;

impl PileSelector for FirstPile {
    fn choose(&mut self, piles: &[EnergyPile]) -> Option<EnergyPile> {
        piles.first().copied()
    }
}

/// The pile with the most energy; ties go to the earliest in scan order
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestPile;

impl PileSelector for LargestPile {
    fn choose(&mut self, piles: &[EnergyPile]) -> Option<EnergyPile> {
        piles
            .iter()
            .fold(None::<&EnergyPile>, |best, pile| match best {
                Some(b) if b.amount >= pile.amount => Some(b),
                _ => Some(pile),
            })
            .copied()
    }
}

impl PileSelection {
    /// Build the selector this setting names
    pub fn selector(self, seed: u64) -> Box<dyn PileSelector> {
        match self {
            PileSelection::Random => Box::new(RandomPile::seeded(seed)),
            PileSelection::First => Box::new(FirstPile),
            PileSelection::Largest => Box::new(LargestPile),
        }
    }
}
