//! Glyphs and colour-code markers that appear in action bar text.

pub const HEALTH: char = '❤';
pub const MANA: char = '✎';
pub const OVERFLOW_MANA: char = 'ʬ';
pub const DEFENSE: char = '❈';
pub const RIFT_TIME: char = 'ф';
pub const PRESSURE: char = '❍';
pub const LOCATION: char = '⏣';

pub const TICKER_Z: char = 'ⓩ';
pub const TICKER_O: char = 'Ⓞ';

/// Prefix of every legacy style code (`§` followed by one code character)
pub const STYLE_PREFIX: char = '§';

/// Colour tiers that start the "spent" part of a ticker run, in the order they
/// are tried. Ornate/Florid use gold, regular uses dark green, Foil uses gray.
pub const TICKER_TIER_MARKERS: [&str; 3] = ["§6§l", "§2§l", "§7§l"];

/// Green colour code; a rift timer carrying it is counting down
pub const RIFT_TICKING_MARKER: &str = "§a";

pub const NOT_ENOUGH_MANA: &str = "NOT ENOUGH MANA";

/// Replacement for a "not enough mana" segment whose tickers are hidden
pub const NOT_ENOUGH_MANA_BOLD_RED: &str = "§c§lNOT ENOUGH MANA";

/// True when the text contains either ticker glyph
pub fn has_tickers(text: &str) -> bool {
    text.contains(TICKER_Z) || text.contains(TICKER_O)
}
