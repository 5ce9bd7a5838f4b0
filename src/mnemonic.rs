//! Major System reference: which consonant sounds stand for which digit.

pub const DIGIT_SOUNDS: [&str; 10] = [
    "S, soft C, Z",
    "T, D",
    "N",
    "M",
    "R",
    "L",
    "J, SH, CH, soft G",
    "K, hard C, hard G",
    "F, V",
    "P, B",
];

/// Worked examples: (number, sound breakdown, words)
pub const EXAMPLES: [(&str, &str, &str); 3] = [
    ("42", "R + N", "Rain, Ran, Ruin"),
    ("07", "S + K", "Sock, Sack"),
    ("25", "N + L", "Nail, Nile"),
];

pub const TIPS: [&str; 3] = [
    "Vowels (A, E, I, O, U) don't count - use them freely",
    "Create vivid, memorable images for each number",
    "Practice regularly to build strong associations",
];

pub fn sounds_for(digit: u8) -> Option<&'static str> {
    DIGIT_SOUNDS.get(digit as usize).copied()
}

/// Sound breakdown for every digit of a displayed number,
/// e.g. "07" -> ["S, soft C, Z", "K, hard C, hard G"]
pub fn sounds_for_display(display: &str) -> Vec<&'static str> {
    display
        .chars()
        .filter_map(|c| c.to_digit(10))
        .filter_map(|d| sounds_for(d as u8))
        .collect()
}

/// Two-column text table used by `--help-sounds` and the help screen
pub fn reference_lines() -> Vec<String> {
    (0..5)
        .map(|d| {
            format!(
                "{} → {:<22} |  {} → {}",
                d,
                DIGIT_SOUNDS[d],
                d + 5,
                DIGIT_SOUNDS[d + 5]
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sounds_for() {
        assert_eq!(sounds_for(2), Some("N"));
        assert_eq!(sounds_for(9), Some("P, B"));
        assert_eq!(sounds_for(10), None);
    }

    #[test]
    fn test_sounds_for_display() {
        assert_eq!(sounds_for_display("42"), vec!["R", "N"]);
        assert_eq!(sounds_for_display("7"), vec!["K, hard C, hard G"]);
    }

    #[test]
    fn test_reference_lines_cover_all_digits() {
        let lines = reference_lines();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("0 → S"));
        assert!(lines[4].contains("9 → P, B"));
    }
}
