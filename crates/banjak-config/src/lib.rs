//! Settings for the banjak showcase.
//!
//! Everything is optional: a missing config file yields defaults silently,
//! and any field left out of the file falls back to its default. A file
//! that exists but cannot be read or parsed is a real error — the user
//! wrote it, so the host reports it instead of guessing.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use banjak_core::{Effect, MotionPreference, Speed};
use banjak_effects::{
    Aurora, AuroraConfig, Bubbles, BubblesConfig, Drift, DriftConfig, EffectKind, Fireflies,
    FirefliesConfig, Halo, HaloConfig, Helix, HelixConfig, Lattice, LatticeConfig, Liquid,
    LiquidConfig, Orbits, OrbitsConfig, Parallax, ParallaxConfig, Pulse, PulseConfig, Ribbons,
    RibbonsConfig, Snowdrift, SnowdriftConfig, Sparks, SparksConfig, Starfield, StarfieldConfig,
    Trail, TrailConfig,
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read config at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Global settings plus one optional tuning table per effect variant.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Effect mounted at startup.
    pub effect: EffectKind,
    pub speed: Speed,
    /// Target frames per second of the host loop.
    pub fps: u32,
    /// Fixed RNG seed; absent, each run seeds from system time.
    pub seed: Option<u64>,
    /// Overrides the environment-resolved reduced-motion preference.
    pub reduced_motion: Option<bool>,
    /// Mount the trail overlay on top of the background effect.
    pub overlay: bool,

    pub drift: DriftConfig,
    pub fireflies: FirefliesConfig,
    pub aurora: AuroraConfig,
    pub liquid: LiquidConfig,
    pub helix: HelixConfig,
    pub lattice: LatticeConfig,
    pub trail: TrailConfig,
    pub sparks: SparksConfig,
    pub starfield: StarfieldConfig,
    pub snowdrift: SnowdriftConfig,
    pub orbits: OrbitsConfig,
    pub ribbons: RibbonsConfig,
    pub bubbles: BubblesConfig,
    pub halo: HaloConfig,
    pub parallax: ParallaxConfig,
    pub pulse: PulseConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            effect: EffectKind::default(),
            speed: Speed::default(),
            fps: 30,
            seed: None,
            reduced_motion: None,
            overlay: false,
            drift: DriftConfig::default(),
            fireflies: FirefliesConfig::default(),
            aurora: AuroraConfig::default(),
            liquid: LiquidConfig::default(),
            helix: HelixConfig::default(),
            lattice: LatticeConfig::default(),
            trail: TrailConfig::default(),
            sparks: SparksConfig::default(),
            starfield: StarfieldConfig::default(),
            snowdrift: SnowdriftConfig::default(),
            orbits: OrbitsConfig::default(),
            ribbons: RibbonsConfig::default(),
            bubbles: BubblesConfig::default(),
            halo: HaloConfig::default(),
            parallax: ParallaxConfig::default(),
            pulse: PulseConfig::default(),
        }
    }
}

impl Settings {
    /// `$XDG_CONFIG_HOME/banjak/config.toml` (platform equivalent).
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "banjak").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from the config path. A missing file yields defaults.
    pub fn load() -> Result<Self, SettingsError> {
        let Some(path) = Self::config_path() else {
            debug!("no config directory available, using defaults");
            return Ok(Self::default());
        };
        match std::fs::read_to_string(&path) {
            Ok(text) => Self::from_toml(&text).map_err(|source| SettingsError::Parse {
                path,
                source,
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(SettingsError::Read { path, source }),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Configured seed, or nanoseconds since the epoch.
    pub fn resolve_seed(&self) -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    pub fn motion(&self) -> MotionPreference {
        MotionPreference::resolve(self.reduced_motion)
    }

    /// Fps is clamped to 1..=240; above that the interval would floor to
    /// zero and turn the host loop into a busy spin.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.clamp(1, 240)))
    }

    /// Build an effect variant with this settings' tuning for it.
    pub fn build(&self, kind: EffectKind) -> Box<dyn Effect> {
        match kind {
            EffectKind::Drift => Box::new(Drift::new(self.drift.clone())),
            EffectKind::Fireflies => Box::new(Fireflies::new(self.fireflies.clone())),
            EffectKind::Aurora => Box::new(Aurora::new(self.aurora.clone())),
            EffectKind::Liquid => Box::new(Liquid::new(self.liquid.clone())),
            EffectKind::Helix => Box::new(Helix::new(self.helix.clone())),
            EffectKind::Lattice => Box::new(Lattice::new(self.lattice.clone())),
            EffectKind::Trail => Box::new(Trail::new(self.trail.clone())),
            EffectKind::Sparks => Box::new(Sparks::new(self.sparks.clone())),
            EffectKind::Starfield => Box::new(Starfield::new(self.starfield.clone())),
            EffectKind::Snowdrift => Box::new(Snowdrift::new(self.snowdrift.clone())),
            EffectKind::Orbits => Box::new(Orbits::new(self.orbits.clone())),
            EffectKind::Ribbons => Box::new(Ribbons::new(self.ribbons.clone())),
            EffectKind::Bubbles => Box::new(Bubbles::new(self.bubbles.clone())),
            EffectKind::Halo => Box::new(Halo::new(self.halo.clone())),
            EffectKind::Parallax => Box::new(Parallax::new(self.parallax.clone())),
            EffectKind::Pulse => Box::new(Pulse::new(self.pulse.clone())),
        }
    }
}
