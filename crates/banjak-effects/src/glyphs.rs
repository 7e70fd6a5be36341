//! Glyph sets shared across effect variants.

/// Characters used for starfield twinkling.
pub const STAR_GLYPHS: &[char] = &['.', '*', '+', '·', '✦', '✧'];

/// Characters used for snowdrift, indexed by size category.
pub const SNOW_GLYPHS: &[char] = &['·', '•', '*', '❄', '❅', '❆'];

/// Characters used for click sparks.
pub const SPARK_GLYPHS: &[char] = &['·', '+', '✶', '*'];

/// Plain dots, dimmest to brightest.
pub const DOT_GLYPHS: &[char] = &['·', '•', '●'];
