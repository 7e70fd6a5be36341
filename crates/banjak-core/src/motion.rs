//! Reduced-motion preference and the global animation speed multiplier.

use serde::Deserialize;

/// Accessibility preference: under `Reduced`, an effect instance performs
/// its initial static paint and schedules no frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPreference {
    #[default]
    Full,
    Reduced,
}

impl MotionPreference {
    /// Resolve from an explicit config override first, then from the
    /// `BANJAK_REDUCED_MOTION` / `REDUCED_MOTION` environment variables.
    pub fn resolve(config_override: Option<bool>) -> Self {
        let reduced = config_override
            .or_else(|| env_flag("BANJAK_REDUCED_MOTION"))
            .or_else(|| env_flag("REDUCED_MOTION"))
            .unwrap_or(false);
        if reduced {
            MotionPreference::Reduced
        } else {
            MotionPreference::Full
        }
    }

    pub fn is_reduced(self) -> bool {
        self == MotionPreference::Reduced
    }

    pub fn toggle(self) -> Self {
        match self {
            MotionPreference::Full => MotionPreference::Reduced,
            MotionPreference::Reduced => MotionPreference::Full,
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|v| is_truthy(&v))
}

pub(crate) fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Global animation speed, multiplied into every effect's per-frame motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Speed {
    pub fn factor(self) -> f32 {
        match self {
            Speed::Slow => 0.5,
            Speed::Normal => 1.0,
            Speed::Fast => 1.8,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Speed::Slow => Speed::Normal,
            Speed::Normal => Speed::Fast,
            Speed::Fast => Speed::Slow,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Speed::Slow => "slow",
            Speed::Normal => "normal",
            Speed::Fast => "fast",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_override_wins() {
        // The override short-circuits before any environment lookup.
        assert_eq!(
            MotionPreference::resolve(Some(true)),
            MotionPreference::Reduced
        );
        assert_eq!(
            MotionPreference::resolve(Some(false)),
            MotionPreference::Full
        );
    }

    #[test]
    fn truthy_values() {
        for v in ["1", "true", "YES", " on "] {
            assert!(is_truthy(v), "{v:?} should be truthy");
        }
        for v in ["0", "false", "no", "off", "", "2"] {
            assert!(!is_truthy(v), "{v:?} should be falsy");
        }
    }

    #[test]
    fn speed_cycles_through_all_variants() {
        let s = Speed::Slow;
        assert_eq!(s.next().next().next(), s);
        assert!(Speed::Fast.factor() > Speed::Slow.factor());
    }
}
