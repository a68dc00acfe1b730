//! Compact display formatting of the heat score.
//!
//! Mirrors `Intl.NumberFormat` compact notation: values under a thousand are
//! printed as-is, larger magnitudes are abbreviated to one decimal (1.5K,
//! 23.4M) and to whole units once three digits wide (123K).

/// Input to the formatter was NaN or infinite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("heat value is not finite")]
pub struct NonFiniteHeat;

const UNITS: [(&str, f64); 5] = [
    ("", 1.0),
    ("K", 1e3),
    ("M", 1e6),
    ("B", 1e9),
    ("T", 1e12),
];

/// Format an aggregate score compactly. Pure; rejects non-finite input.
pub fn format_compact(value: f64) -> Result<String, NonFiniteHeat> {
    if !value.is_finite() {
        return Err(NonFiniteHeat);
    }

    let negative = value < 0.0;
    let abs = value.abs();

    let mut idx = 0;
    while idx + 1 < UNITS.len() && abs >= UNITS[idx + 1].1 {
        idx += 1;
    }
    // rounding can carry into the next unit (999_950 -> 1000K -> 1M)
    if idx + 1 < UNITS.len() && (abs / UNITS[idx].1).round() >= 1000.0 {
        idx += 1;
    }

    let (suffix, step) = UNITS[idx];
    let scaled = abs / step;
    let body = if idx == 0 {
        format!("{:.0}", scaled)
    } else if scaled >= 100.0 {
        format!("{:.0}{}", scaled.round(), suffix)
    } else {
        let digits = format!("{:.1}", scaled);
        let digits = digits.strip_suffix(".0").unwrap_or(&digits);
        format!("{}{}", digits, suffix)
    };

    Ok(if negative { format!("-{}", body) } else { body })
}

/// Integer convenience for tallies; an i64 is always finite.
pub fn format_heat(value: i64) -> String {
    match format_compact(value as f64) {
        Ok(s) => s,
        Err(_) => value.to_string(),
    }
}
