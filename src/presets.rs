/// A named range offered on the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingPreset {
    pub name: &'static str,
    pub range_start: &'static str,
    pub range_end: &'static str,
    pub description: &'static str,
}

pub const PRESETS: [TrainingPreset; 6] = [
    TrainingPreset {
        name: "Beginner",
        range_start: "00",
        range_end: "09",
        description: "Zero-prefixed numbers (00-09)",
    },
    TrainingPreset {
        name: "Single Digits",
        range_start: "0",
        range_end: "9",
        description: "Basic single digits (0-9)",
    },
    TrainingPreset {
        name: "Teens",
        range_start: "10",
        range_end: "19",
        description: "Teen numbers (10-19)",
    },
    TrainingPreset {
        name: "Twenties",
        range_start: "20",
        range_end: "29",
        description: "Twenty range (20-29)",
    },
    TrainingPreset {
        name: "First 50",
        range_start: "00",
        range_end: "49",
        description: "Extended practice (00-49)",
    },
    TrainingPreset {
        name: "Full Range",
        range_start: "00",
        range_end: "99",
        description: "Complete Major System (00-99)",
    },
];

/// Case-insensitive lookup; spaces, dashes and underscores are ignored
pub fn find_preset(name: &str) -> Option<&'static TrainingPreset> {
    let key = normalize(name);
    PRESETS.iter().find(|p| normalize(p.name) == key)
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
