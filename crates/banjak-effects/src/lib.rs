//! The banjak effect catalogue.
//!
//! One module per visual variant. Each variant is a `{config, state}` pair:
//! the config is plain data with documented defaults, deserializable
//! straight from the settings file; the state implements
//! [`banjak_core::Effect`] over the shared engine.

pub mod glyphs;

mod aurora;
mod bubbles;
mod drift;
mod fireflies;
mod halo;
mod helix;
mod lattice;
mod liquid;
mod orbits;
mod parallax;
mod pulse;
mod ribbons;
mod snowdrift;
mod sparks;
mod starfield;
mod trail;

pub use aurora::{Aurora, AuroraConfig};
pub use bubbles::{Bubbles, BubblesConfig};
pub use drift::{Drift, DriftConfig};
pub use fireflies::{Fireflies, FirefliesConfig};
pub use halo::{Halo, HaloConfig};
pub use helix::{Helix, HelixConfig};
pub use lattice::{Lattice, LatticeConfig};
pub use liquid::{Liquid, LiquidConfig};
pub use orbits::{Orbits, OrbitsConfig};
pub use parallax::{Parallax, ParallaxConfig};
pub use pulse::{Pulse, PulseConfig};
pub use ribbons::{Ribbons, RibbonsConfig};
pub use snowdrift::{Snowdrift, SnowdriftConfig};
pub use sparks::{Sparks, SparksConfig};
pub use starfield::{Starfield, StarfieldConfig};
pub use trail::{Trail, TrailConfig};

use serde::Deserialize;

/// Registry of every effect variant, in showcase cycling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    #[default]
    Drift,
    Fireflies,
    Aurora,
    Liquid,
    Helix,
    Lattice,
    Trail,
    Sparks,
    Starfield,
    Snowdrift,
    Orbits,
    Ribbons,
    Bubbles,
    Halo,
    Parallax,
    Pulse,
}

impl EffectKind {
    pub const fn all() -> [EffectKind; 16] {
        use EffectKind::*;
        [
            Drift, Fireflies, Aurora, Liquid, Helix, Lattice, Trail, Sparks, Starfield,
            Snowdrift, Orbits, Ribbons, Bubbles, Halo, Parallax, Pulse,
        ]
    }

    /// Config-file name.
    pub const fn name(self) -> &'static str {
        match self {
            EffectKind::Drift => "drift",
            EffectKind::Fireflies => "fireflies",
            EffectKind::Aurora => "aurora",
            EffectKind::Liquid => "liquid",
            EffectKind::Helix => "helix",
            EffectKind::Lattice => "lattice",
            EffectKind::Trail => "trail",
            EffectKind::Sparks => "sparks",
            EffectKind::Starfield => "starfield",
            EffectKind::Snowdrift => "snowdrift",
            EffectKind::Orbits => "orbits",
            EffectKind::Ribbons => "ribbons",
            EffectKind::Bubbles => "bubbles",
            EffectKind::Halo => "halo",
            EffectKind::Parallax => "parallax",
            EffectKind::Pulse => "pulse",
        }
    }

    /// Display title for the HUD.
    pub const fn title(self) -> &'static str {
        match self {
            EffectKind::Drift => "Drift",
            EffectKind::Fireflies => "Fireflies",
            EffectKind::Aurora => "Aurora",
            EffectKind::Liquid => "Liquid",
            EffectKind::Helix => "Helix",
            EffectKind::Lattice => "Lattice",
            EffectKind::Trail => "Trail",
            EffectKind::Sparks => "Sparks",
            EffectKind::Starfield => "Starfield",
            EffectKind::Snowdrift => "Snowdrift",
            EffectKind::Orbits => "Orbits",
            EffectKind::Ribbons => "Ribbons",
            EffectKind::Bubbles => "Bubbles",
            EffectKind::Halo => "Halo",
            EffectKind::Parallax => "Parallax",
            EffectKind::Pulse => "Pulse",
        }
    }

    /// Build this variant with its default tuning.
    pub fn build_default(self) -> Box<dyn banjak_core::Effect> {
        match self {
            EffectKind::Drift => Box::new(Drift::new(DriftConfig::default())),
            EffectKind::Fireflies => Box::new(Fireflies::new(FirefliesConfig::default())),
            EffectKind::Aurora => Box::new(Aurora::new(AuroraConfig::default())),
            EffectKind::Liquid => Box::new(Liquid::new(LiquidConfig::default())),
            EffectKind::Helix => Box::new(Helix::new(HelixConfig::default())),
            EffectKind::Lattice => Box::new(Lattice::new(LatticeConfig::default())),
            EffectKind::Trail => Box::new(Trail::new(TrailConfig::default())),
            EffectKind::Sparks => Box::new(Sparks::new(SparksConfig::default())),
            EffectKind::Starfield => Box::new(Starfield::new(StarfieldConfig::default())),
            EffectKind::Snowdrift => Box::new(Snowdrift::new(SnowdriftConfig::default())),
            EffectKind::Orbits => Box::new(Orbits::new(OrbitsConfig::default())),
            EffectKind::Ribbons => Box::new(Ribbons::new(RibbonsConfig::default())),
            EffectKind::Bubbles => Box::new(Bubbles::new(BubblesConfig::default())),
            EffectKind::Halo => Box::new(Halo::new(HaloConfig::default())),
            EffectKind::Parallax => Box::new(Parallax::new(ParallaxConfig::default())),
            EffectKind::Pulse => Box::new(Pulse::new(PulseConfig::default())),
        }
    }

    pub fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|&k| k == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|&k| k == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

impl std::str::FromStr for EffectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|k| k.name() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| format!("unknown effect {s:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_visits_every_kind_once() {
        let mut kind = EffectKind::Drift;
        let mut seen = Vec::new();
        for _ in 0..EffectKind::all().len() {
            seen.push(kind);
            kind = kind.next();
        }
        assert_eq!(kind, EffectKind::Drift);
        seen.sort_by_key(|k| k.name());
        seen.dedup();
        assert_eq!(seen.len(), EffectKind::all().len());
    }

    #[test]
    fn prev_inverts_next() {
        for kind in EffectKind::all() {
            assert_eq!(kind.next().prev(), kind);
        }
    }

    #[test]
    fn names_parse_back() {
        for kind in EffectKind::all() {
            assert_eq!(kind.name().parse::<EffectKind>().unwrap(), kind);
        }
        assert!("nope".parse::<EffectKind>().is_err());
    }
}
