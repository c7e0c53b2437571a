//! Choosing rooms for a dungeon: what kinds of room there are, how often each should
//! appear, and which templates can fill each kind.

use alloc::vec::Vec;

use hashbrown::HashMap;
use rand::Rng;

use undercroft::{Material, MaterialProvider, Room};

use crate::{DungeonMaterial, GenError, RoomTemplate, TemplateParameters};

/// The role a room plays in a dungeon's layout.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[derive(strum::Display, strum::EnumString, strum::EnumIter, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum RoomKind {
    /// Where the player enters the dungeon.
    Entrance,
    #[allow(missing_docs)]
    Exit,
    /// A safe room where paths meet.
    Hub,
    #[allow(missing_docs)]
    Normal,
    #[allow(missing_docs)]
    Treasure,
    #[allow(missing_docs)]
    Trap,
    /// A room full of monsters.
    Monster,
    #[allow(missing_docs)]
    Puzzle,
    /// A guardian partway through the dungeon.
    MiniBoss,
    /// The dungeon's final guardian.
    Boss,
    /// Leads only to the level above.
    StaircaseUp,
    /// Leads only to the level below.
    StaircaseDown,
    /// Leads both up and down.
    StaircaseBoth,
}

impl RoomKind {
    /// Relative likelihood of this kind in [`RoomKind::choose_weighted()`].
    pub fn weight(self) -> f64 {
        use RoomKind::*;
        match self {
            Entrance | Exit | Normal => 1.0,
            Hub => 0.8,
            Treasure => 0.6,
            Trap => 0.4,
            Monster => 0.7,
            Puzzle => 0.5,
            MiniBoss => 0.3,
            Boss => 0.2,
            StaircaseUp | StaircaseDown | StaircaseBoth => 0.5,
        }
    }

    /// Picks a kind at random, in proportion to [`RoomKind::weight()`].
    pub fn choose_weighted<R: Rng + ?Sized>(rng: &mut R) -> Self {
        use exhaust::Exhaust as _;
        let total: f64 = Self::exhaust().map(Self::weight).sum();
        let mut roll = rng.random::<f64>() * total;
        let mut chosen = RoomKind::Normal;
        for kind in Self::exhaust() {
            chosen = kind;
            roll -= kind.weight();
            if roll < 0.0 {
                break;
            }
        }
        chosen
    }

    /// The templates built into the crate for this kind, as used by
    /// [`TemplateRegistry::new()`].
    fn builtin_templates(self) -> &'static [RoomTemplate] {
        use RoomTemplate as T;
        match self {
            RoomKind::Entrance => &[T::EntranceRoom, T::EntranceRuins, T::EntranceTemple],
            RoomKind::Exit => &[T::ExitRoom, T::EntranceRoom],
            RoomKind::Hub => &[
                T::FountainRoom,
                T::HubCamp,
                T::HubLibrary,
                T::NetherBreach,
                T::HubGrandFoyer,
                T::VoidObservatory,
            ],
            // There are no dedicated puzzle rooms; puzzles are whatever a normal room is.
            RoomKind::Normal | RoomKind::Puzzle => &[
                T::AlchemyRoom,
                T::Greenhouse,
                T::Mine,
                T::StorageRoom,
                T::CombatRoom,
                T::CombatTrainingGround,
                T::CombatColosseum,
                T::CombatArena,
                T::PuzzleMaze,
                T::CrystalCave,
                T::ClockworkWorkshop,
                T::NetherBreach,
            ],
            RoomKind::Treasure => &[
                T::TreasureRoom,
                T::TreasureVault,
                T::TreasureRoyal,
                T::TreasureOcean,
                T::RitualChamber,
                T::VoidObservatory,
                T::CrystalCave,
            ],
            RoomKind::Trap => &[
                T::TrapRoom,
                T::TrapArrowCorridor,
                T::TrapPitfall,
                T::MazeRoom,
                T::MazeGarden,
                T::RitualChamber,
            ],
            RoomKind::Monster => &[T::CombatRoom, T::CombatArena],
            RoomKind::MiniBoss => &[T::MiniBossArena, T::MiniBossArenaDark],
            RoomKind::Boss => &[T::BossArena],
            RoomKind::StaircaseUp => &[T::StaircaseUp],
            RoomKind::StaircaseDown => &[T::StaircaseDown],
            RoomKind::StaircaseBoth => &[T::StaircaseBoth],
        }
    }
}

/// Failure to find a template in a [`TemplateRegistry`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// Neither the requested kind nor the fallback kind [`RoomKind::Normal`] has any
    /// templates.
    #[error("no templates are registered for room kind {0}")]
    EmptyKind(RoomKind),
}

/// The templates available for each [`RoomKind`].
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateRegistry {
    templates: HashMap<RoomKind, Vec<RoomTemplate>>,
}

impl TemplateRegistry {
    /// A registry holding every built-in template, under every kind it suits.
    /// Every kind has at least one template.
    pub fn new() -> Self {
        use exhaust::Exhaust as _;
        Self {
            templates: RoomKind::exhaust()
                .map(|kind| (kind, kind.builtin_templates().to_vec()))
                .collect(),
        }
    }

    /// A registry holding exactly the given templates.
    ///
    /// Kinds may be left empty; [`TemplateRegistry::random_template()`] falls back to
    /// [`RoomKind::Normal`] for them.
    pub fn from_entries(entries: impl IntoIterator<Item = (RoomKind, RoomTemplate)>) -> Self {
        let mut templates: HashMap<RoomKind, Vec<RoomTemplate>> = HashMap::new();
        for (kind, template) in entries {
            let list = templates.entry(kind).or_default();
            if !list.contains(&template) {
                list.push(template);
            }
        }
        Self { templates }
    }

    /// Returns the templates registered for `kind`, in registration order.
    pub fn templates(&self, kind: RoomKind) -> &[RoomTemplate] {
        self.templates.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Picks one of the templates for `kind`, uniformly.
    ///
    /// If `kind` has none, a [`RoomKind::Normal`] template is chosen instead.
    pub fn random_template<R: Rng + ?Sized>(
        &self,
        kind: RoomKind,
        rng: &mut R,
    ) -> Result<RoomTemplate, RegistryError> {
        let mut candidates = self.templates(kind);
        if candidates.is_empty() && kind != RoomKind::Normal {
            log::warn!("no templates for room kind {kind}; using a {} room", RoomKind::Normal);
            candidates = self.templates(RoomKind::Normal);
        }
        if candidates.is_empty() {
            return Err(RegistryError::EmptyKind(kind));
        }
        Ok(candidates[rng.random_range(0..candidates.len())])
    }

    /// Picks a template for `kind` with [`TemplateRegistry::random_template()`] and
    /// builds it.
    pub fn build_random<M: Material, R: Rng + ?Sized>(
        &self,
        kind: RoomKind,
        rng: &mut R,
        materials: &MaterialProvider<DungeonMaterial, M>,
        params: TemplateParameters,
    ) -> Result<Room<M>, GenError> {
        let template = self.random_template(kind, rng)?;
        template.build(materials, params)
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity_provider;
    use exhaust::Exhaust as _;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng as _;
    use rand_xoshiro::Xoshiro256Plus;
    use strum::IntoEnumIterator as _;

    #[test]
    fn every_kind_has_builtin_templates() {
        let registry = TemplateRegistry::new();
        for kind in RoomKind::exhaust() {
            assert!(!registry.templates(kind).is_empty(), "{kind}");
        }
    }

    #[test]
    fn every_template_is_registered() {
        let registry = TemplateRegistry::new();
        for template in RoomTemplate::iter() {
            assert!(
                RoomKind::exhaust().any(|kind| registry.templates(kind).contains(&template)),
                "{template} is unreachable"
            );
        }
    }

    #[test]
    fn builtin_mapping() {
        let registry = TemplateRegistry::new();
        assert_eq!(registry.templates(RoomKind::Boss), &[RoomTemplate::BossArena]);
        assert_eq!(
            registry.templates(RoomKind::Puzzle),
            registry.templates(RoomKind::Normal)
        );
        assert!(registry
            .templates(RoomKind::Exit)
            .contains(&RoomTemplate::EntranceRoom));
        assert_eq!(registry.templates(RoomKind::Hub).len(), 6);
    }

    #[test]
    fn random_template_is_uniform_over_kind() {
        let registry = TemplateRegistry::new();
        let mut rng = Xoshiro256Plus::seed_from_u64(1);
        let mut seen = hashbrown::HashSet::new();
        for _ in 0..200 {
            let template = registry.random_template(RoomKind::MiniBoss, &mut rng).unwrap();
            assert!(registry.templates(RoomKind::MiniBoss).contains(&template));
            seen.insert(template);
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn empty_kind_falls_back_to_normal() {
        let registry = TemplateRegistry::from_entries([
            (RoomKind::Normal, RoomTemplate::Mine),
            (RoomKind::Boss, RoomTemplate::BossArena),
        ]);
        let mut rng = Xoshiro256Plus::seed_from_u64(0);
        assert_eq!(
            registry.random_template(RoomKind::Hub, &mut rng),
            Ok(RoomTemplate::Mine)
        );
        assert_eq!(
            registry.random_template(RoomKind::Boss, &mut rng),
            Ok(RoomTemplate::BossArena)
        );

        let empty = TemplateRegistry::from_entries(Vec::new());
        assert_eq!(
            empty.random_template(RoomKind::Trap, &mut rng),
            Err(RegistryError::EmptyKind(RoomKind::Trap))
        );
        assert_eq!(
            empty
                .build_random(
                    RoomKind::Trap,
                    &mut rng,
                    &identity_provider(),
                    TemplateParameters::default()
                )
                .unwrap_err(),
            GenError::Registry(RegistryError::EmptyKind(RoomKind::Trap))
        );
    }

    #[test]
    fn from_entries_ignores_duplicates() {
        let registry = TemplateRegistry::from_entries([
            (RoomKind::Trap, RoomTemplate::TrapRoom),
            (RoomKind::Trap, RoomTemplate::TrapPitfall),
            (RoomKind::Trap, RoomTemplate::TrapRoom),
        ]);
        assert_eq!(
            registry.templates(RoomKind::Trap),
            &[RoomTemplate::TrapRoom, RoomTemplate::TrapPitfall]
        );
    }

    #[test]
    fn weighted_choice_follows_weights() {
        let mut rng = Xoshiro256Plus::seed_from_u64(7);
        let mut counts: HashMap<RoomKind, u32> = HashMap::new();
        let trials = 20_000;
        for _ in 0..trials {
            *counts.entry(RoomKind::choose_weighted(&mut rng)).or_default() += 1;
        }
        let total: f64 = RoomKind::exhaust().map(RoomKind::weight).sum();
        for kind in RoomKind::exhaust() {
            let expected = kind.weight() / total;
            let observed = f64::from(counts.get(&kind).copied().unwrap_or(0)) / f64::from(trials);
            assert!(
                (observed - expected).abs() < 0.02,
                "{kind}: expected {expected}, observed {observed}"
            );
        }
    }

    #[test]
    fn kind_names() {
        assert_eq!(RoomKind::MiniBoss.to_string(), "mini_boss");
        assert_eq!("staircase_up".parse(), Ok(RoomKind::StaircaseUp));
    }
}
