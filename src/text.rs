//! Style-code stripping and number decoding for action bar text.

use std::borrow::Cow;

use anyhow::{bail, Context, Result};

use crate::symbols::STYLE_PREFIX;

/// Remove every legacy style code (`§x`) from the text.
///
/// A trailing lone `§` is dropped as well. Text without any style codes is
/// returned borrowed.
pub fn strip_formatting(text: &str) -> Cow<'_, str> {
    if !text.contains(STYLE_PREFIX) {
        return Cow::Borrowed(text);
    }

    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == STYLE_PREFIX {
            // Skip the code character too
            chars.next();
        } else {
            plain.push(c);
        }
    }
    Cow::Owned(plain)
}

/// Number of visible characters once style codes are removed
pub fn visible_len(text: &str) -> usize {
    strip_formatting(text).chars().count()
}

fn without_commas(raw: &str) -> Cow<'_, str> {
    if raw.contains(',') {
        Cow::Owned(raw.replace(',', ""))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Parse a float that may carry thousands separators ("2,902" -> 2902.0)
pub fn parse_float(raw: &str) -> Result<f32> {
    let cleaned = without_commas(raw.trim());
    cleaned
        .parse::<f32>()
        .with_context(|| format!("not a number: {:?}", raw))
}

/// Parse an integer that may carry thousands separators ("1,650" -> 1650)
pub fn parse_int(raw: &str) -> Result<i32> {
    let cleaned = without_commas(raw.trim());
    cleaned
        .parse::<i32>()
        .with_context(|| format!("not an integer: {:?}", raw))
}

/// Parse a float with an optional `k`/`m` magnitude suffix ("3k" -> 3000.0,
/// "1.2M" -> 1200000.0). Thousands separators are accepted.
pub fn parse_float_with_magnitude(raw: &str) -> Result<f32> {
    let cleaned = without_commas(raw.trim());
    let (digits, multiplier) = match cleaned.chars().last() {
        Some('k' | 'K') => (&cleaned[..cleaned.len() - 1], 1_000.0),
        Some('m' | 'M') => (&cleaned[..cleaned.len() - 1], 1_000_000.0),
        Some(_) => (&cleaned[..], 1.0),
        None => bail!("empty number"),
    };
    let value = digits
        .parse::<f32>()
        .with_context(|| format!("not a number: {:?}", raw))?;
    Ok(value * multiplier)
}

/// Integer flavour of [`parse_float_with_magnitude`]; fractional results are
/// truncated ("1.5k" -> 1500, "2.25k" -> 2250).
pub fn parse_int_with_magnitude(raw: &str) -> Result<i32> {
    let value = parse_float_with_magnitude(raw)?;
    if !value.is_finite() || value > i32::MAX as f32 || value < i32::MIN as f32 {
        bail!("number out of range: {:?}", raw);
    }
    Ok(value as i32)
}
