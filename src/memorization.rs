//! Long-number memorisation drill.
//!
//! A random digit string is shown, the user memorises it with the timer
//! running, stops to hide it, then toggles it back on to check their recall.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::Clock;
use crate::error::{MajorError, Result};

pub const MIN_DIGITS: usize = 1;
pub const MAX_DIGITS: usize = 500;
pub const MIN_PAIR_VALUE: u8 = 10;
pub const MAX_PAIR_VALUE: u8 = 99;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
pub enum FontSizePreference {
    #[default]
    Auto,
    Small,
    Medium,
    Large,
    ExtraLarge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemorizationSettings {
    pub number_of_digits: usize,
    pub max_pair_value: u8,
    pub show_separated: bool,
    pub show_timer: bool,
    pub font_size: FontSizePreference,
}

impl Default for MemorizationSettings {
    fn default() -> Self {
        Self {
            number_of_digits: 20,
            max_pair_value: MAX_PAIR_VALUE,
            show_separated: false,
            show_timer: false,
            font_size: FontSizePreference::Auto,
        }
    }
}

impl MemorizationSettings {
    /// Pull out-of-range values back into their allowed bounds
    pub fn clamped(mut self) -> Self {
        self.number_of_digits = self.number_of_digits.clamp(MIN_DIGITS, MAX_DIGITS);
        self.max_pair_value = self.max_pair_value.clamp(MIN_PAIR_VALUE, MAX_PAIR_VALUE);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum GamePhase {
    Setup,
    Memorizing,
    Stopped,
}

/// Random number of `digits` digits built from two-digit pairs.
///
/// Pairs never exceed `max_pair_value`. The number never starts with zero: an
/// odd count gets a leading 1-9 digit, an even count a first pair of at least 10.
pub fn generate_number<R: Rng + ?Sized>(
    digits: usize,
    max_pair_value: u8,
    rng: &mut R,
) -> Result<String> {
    if digits == 0 || !(MIN_PAIR_VALUE..=MAX_PAIR_VALUE).contains(&max_pair_value) {
        return Err(MajorError::InvalidArgument(
            "invalid parameters for number generation".to_string(),
        ));
    }

    let is_odd = digits % 2 == 1;
    let mut out = String::with_capacity(digits);

    if is_odd {
        out.push_str(&rng.gen_range(1..=9u8).to_string());
    }

    for i in 0..digits / 2 {
        let min = if i == 0 && !is_odd { MIN_PAIR_VALUE } else { 0 };
        let pair = rng.gen_range(min..=max_pair_value);
        out.push_str(&format!("{pair:02}"));
    }

    Ok(out)
}

/// Group a digit string into pairs; an odd leading digit stands alone
pub fn format_number(number: &str, separated: bool) -> String {
    if number.is_empty() || !separated {
        return number.to_string();
    }

    let chars: Vec<char> = number.chars().collect();
    let (head, pairs) = chars.split_at(chars.len() % 2);

    let mut groups: Vec<String> = Vec::with_capacity(chars.len() / 2 + 1);
    if !head.is_empty() {
        groups.push(head.iter().collect());
    }
    groups.extend(pairs.chunks(2).map(|c| c.iter().collect::<String>()));
    groups.join(" ")
}

/// `MM:SS`
pub fn format_time(elapsed: Duration) -> String {
    crate::util::format_clock(elapsed)
}

#[derive(Debug, Clone)]
pub struct MemorizationGame {
    pub generated_number: String,
    pub phase: GamePhase,
    pub is_number_visible: bool,
    started_at: Option<DateTime<Utc>>,
    elapsed: Duration,
}

impl Default for MemorizationGame {
    fn default() -> Self {
        Self {
            generated_number: String::new(),
            phase: GamePhase::Setup,
            is_number_visible: true,
            started_at: None,
            elapsed: Duration::ZERO,
        }
    }
}

impl MemorizationGame {
    pub fn new<R: Rng + ?Sized>(settings: &MemorizationSettings, rng: &mut R) -> Result<Self> {
        Ok(Self {
            generated_number: generate_number(
                settings.number_of_digits,
                settings.max_pair_value,
                rng,
            )?,
            ..Self::default()
        })
    }

    pub fn start<C: Clock>(&mut self, clock: &C) {
        self.phase = GamePhase::Memorizing;
        self.is_number_visible = true;
        self.started_at = Some(clock.now());
        self.elapsed = Duration::ZERO;
        debug!(digits = self.generated_number.len(), "memorisation started");
    }

    pub fn stop<C: Clock>(&mut self, clock: &C) {
        self.elapsed = self.elapsed(clock);
        self.phase = GamePhase::Stopped;
        self.is_number_visible = false;
        debug!(elapsed_ms = self.elapsed.as_millis() as u64, "memorisation stopped");
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn toggle_visibility(&mut self) {
        self.is_number_visible = !self.is_number_visible;
    }

    pub fn is_timer_running(&self) -> bool {
        self.phase == GamePhase::Memorizing
    }

    /// Time spent memorising; frozen once stopped
    pub fn elapsed<C: Clock>(&self, clock: &C) -> Duration {
        match (self.phase, self.started_at) {
            (GamePhase::Memorizing, Some(start)) => {
                (clock.now() - start).to_std().unwrap_or_default()
            }
            _ => self.elapsed,
        }
    }

    /// What the screen should show right now
    pub fn displayed_number(&self, separated: bool) -> String {
        if self.phase == GamePhase::Setup || !self.is_number_visible {
            String::new()
        } else {
            format_number(&self.generated_number, separated)
        }
    }
}
