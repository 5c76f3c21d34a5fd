// WHY: Pure pitch pattern generation, the leaf every higher layer builds on
// No state, no failure modes: every (mora_count, drop_pos) pair yields a contour

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pitch level of a single mora
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "H")]
    High,
    #[serde(rename = "L")]
    Low,
}

impl Level {
    pub fn as_char(self) -> char {
        match self {
            Level::High => 'H',
            Level::Low => 'L',
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Accent type of a word, determined by where (if anywhere) the pitch drops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchType {
    /// No drop: low start, then high through any following particle
    Heiban,
    /// Drop right after the first mora
    Atamadaka,
    /// Drop after some interior mora
    Nakadaka,
    /// High through the last mora, drop on a following particle
    Odaka,
}

impl PitchType {
    pub fn label(self) -> &'static str {
        match self {
            PitchType::Heiban => "Heiban",
            PitchType::Atamadaka => "Atamadaka",
            PitchType::Nakadaka => "Nakadaka",
            PitchType::Odaka => "Odaka",
        }
    }
}

impl fmt::Display for PitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a drop position.
///
/// Atamadaka is checked before Odaka so a one-mora word with `drop_pos == 1`
/// is Atamadaka.
pub fn drop_pos_to_type(drop_pos: usize, mora_count: usize) -> PitchType {
    match drop_pos {
        0 => PitchType::Heiban,
        1 => PitchType::Atamadaka,
        d if d == mora_count && mora_count > 1 => PitchType::Odaka,
        _ => PitchType::Nakadaka,
    }
}

/// High/low contour of a word with `mora_count` morae and the given drop position
pub fn get_pattern(mora_count: usize, drop_pos: usize) -> Vec<Level> {
    if mora_count == 0 {
        return Vec::new();
    }

    let mut pattern = Vec::with_capacity(mora_count);
    match drop_pos {
        0 => {
            pattern.push(Level::Low);
            pattern.extend(std::iter::repeat(Level::High).take(mora_count - 1));
        }
        1 => {
            pattern.push(Level::High);
            pattern.extend(std::iter::repeat(Level::Low).take(mora_count - 1));
        }
        d if d == mora_count => {
            // mora_count > 1 here, the single-mora case was caught by the arm above
            pattern.push(Level::Low);
            pattern.extend(std::iter::repeat(Level::High).take(mora_count - 1));
        }
        d => {
            pattern.push(Level::Low);
            for i in 1..mora_count {
                pattern.push(if i < d { Level::High } else { Level::Low });
            }
        }
    }
    pattern
}

/// Accent-nucleus flags: only the mora right before the drop is marked
pub fn get_accent_flags(mora_count: usize, drop_pos: usize) -> Vec<bool> {
    let mut flags = vec![false; mora_count];
    if drop_pos >= 1 && drop_pos <= mora_count {
        flags[drop_pos - 1] = true;
    }
    flags
}

/// Render a contour as a compact `LHHH` string
pub fn render_levels(levels: &[Level]) -> String {
    levels.iter().map(|l| l.as_char()).collect()
}

/// Render accent flags with ○ for the nucleus and ● elsewhere
pub fn render_flags(flags: &[bool]) -> String {
    flags.iter().map(|&f| if f { '○' } else { '●' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Level::{High as H, Low as L};

    #[test]
    fn test_lengths_for_all_small_words() {
        for n in 1..=8 {
            for d in 0..=n {
                assert_eq!(get_pattern(n, d).len(), n, "pattern length for ({n},{d})");
                assert_eq!(get_accent_flags(n, d).len(), n, "flags length for ({n},{d})");
            }
        }
    }

    #[test]
    fn test_heiban_pattern() {
        assert_eq!(get_pattern(1, 0), vec![L]);
        assert_eq!(get_pattern(4, 0), vec![L, H, H, H]);
        assert_eq!(get_accent_flags(4, 0), vec![false; 4]);
    }

    #[test]
    fn test_atamadaka_pattern() {
        assert_eq!(get_pattern(1, 1), vec![H]);
        assert_eq!(get_accent_flags(1, 1), vec![true]);
        assert_eq!(get_pattern(3, 1), vec![H, L, L]);
    }

    #[test]
    fn test_odaka_pattern() {
        for n in 2..=6 {
            let mut expected = vec![L];
            expected.extend(vec![H; n - 1]);
            assert_eq!(get_pattern(n, n), expected);

            let flags = get_accent_flags(n, n);
            assert!(flags[n - 1]);
            assert_eq!(flags.iter().filter(|&&f| f).count(), 1);
        }
    }

    #[test]
    fn test_nakadaka_pattern() {
        // お菓子: おかし, drop after 2nd mora
        assert_eq!(get_pattern(3, 2), vec![L, H, L]);
        assert_eq!(get_pattern(5, 3), vec![L, H, H, L, L]);
        assert_eq!(get_accent_flags(5, 3), vec![false, false, true, false, false]);
    }

    #[test]
    fn test_out_of_range_drop_is_total() {
        assert_eq!(get_pattern(0, 3), Vec::<Level>::new());
        assert_eq!(get_pattern(2, 5), vec![L, H]);
        assert_eq!(get_accent_flags(2, 5), vec![false, false]);
        assert!(get_accent_flags(0, 0).is_empty());
    }

    #[test]
    fn test_drop_pos_to_type() {
        assert_eq!(drop_pos_to_type(0, 4), PitchType::Heiban);
        assert_eq!(drop_pos_to_type(1, 1), PitchType::Atamadaka);
        assert_eq!(drop_pos_to_type(1, 4), PitchType::Atamadaka);
        assert_eq!(drop_pos_to_type(4, 4), PitchType::Odaka);
        assert_eq!(drop_pos_to_type(2, 4), PitchType::Nakadaka);
        assert_eq!(drop_pos_to_type(3, 4), PitchType::Nakadaka);
    }

    #[test]
    fn test_rendering() {
        assert_eq!(render_levels(&get_pattern(4, 0)), "LHHH");
        assert_eq!(render_flags(&get_accent_flags(3, 2)), "●○●");
        assert_eq!(serde_json::to_string(&Level::High).unwrap(), "\"H\"");
    }
}
