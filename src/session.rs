use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::error::{MajorError, Result};
use crate::major_number::MajorNumber;
use crate::performance::NumberPerformance;
use crate::sequence::generate_sequence;
use crate::statistics::SessionStatistics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Completed,
}

/// One pass over a range of numbers in shuffled order.
///
/// `NotStarted -> InProgress -> Completed`, no way back. Every advance records
/// how long the current number was on screen.
#[derive(Debug)]
pub struct GameSession<C: Clock = SystemClock> {
    range_start: String,
    range_end: String,
    state: SessionState,
    clock: C,
    total_numbers: usize,
    remaining: VecDeque<MajorNumber>,
    current: Option<(MajorNumber, DateTime<Utc>)>,
    performances: Vec<NumberPerformance>,
    session_start_time: Option<DateTime<Utc>>,
}

impl GameSession<SystemClock> {
    pub fn new(range_start: &str, range_end: &str) -> Result<Self> {
        Self::with_rng(range_start, range_end, SystemClock, &mut rand::thread_rng())
    }
}

impl<C: Clock> GameSession<C> {
    /// Build a session with an injected clock and shuffle source
    pub fn with_rng<R: Rng + ?Sized>(
        range_start: &str,
        range_end: &str,
        clock: C,
        rng: &mut R,
    ) -> Result<Self> {
        let mut numbers = generate_sequence(range_start, range_end)?.to_vec();
        numbers.shuffle(rng);
        Self::with_sequence(range_start, range_end, clock, numbers)
    }

    /// Build a session that presents `numbers` exactly in the given order
    pub fn with_sequence(
        range_start: &str,
        range_end: &str,
        clock: C,
        numbers: Vec<MajorNumber>,
    ) -> Result<Self> {
        if numbers.is_empty() {
            return Err(MajorError::InvalidArgument(
                "a session needs at least one number".to_string(),
            ));
        }

        debug!(
            range_start,
            range_end,
            total = numbers.len(),
            "created training session"
        );

        Ok(Self {
            range_start: range_start.to_string(),
            range_end: range_end.to_string(),
            state: SessionState::NotStarted,
            clock,
            total_numbers: numbers.len(),
            remaining: numbers.into(),
            current: None,
            performances: Vec::new(),
            session_start_time: None,
        })
    }

    pub fn start(&mut self) -> Result<()> {
        if self.state != SessionState::NotStarted {
            return Err(MajorError::InvalidState(
                "session has already been started".to_string(),
            ));
        }

        self.session_start_time = Some(self.clock.now());
        self.state = SessionState::InProgress;
        self.present_next();
        debug!(total = self.total_numbers, "session started");
        Ok(())
    }

    pub fn advance_to_next(&mut self) -> Result<()> {
        if self.state != SessionState::InProgress {
            return Err(MajorError::InvalidState(
                "session is not in progress".to_string(),
            ));
        }

        let (number, presented_at) = self.current.ok_or_else(|| {
            MajorError::InvalidState("no current number to advance from".to_string())
        })?;

        let performance = NumberPerformance::new(number, presented_at, self.clock.now())?;
        debug!(
            number = %number,
            response_ms = performance.response_ms(),
            "recorded recall"
        );
        self.performances.push(performance);

        if self.remaining.is_empty() {
            self.complete();
        } else {
            self.present_next();
        }
        Ok(())
    }

    pub fn statistics(&self) -> Result<SessionStatistics> {
        if self.state != SessionState::Completed {
            return Err(MajorError::InvalidState(
                "session must be completed to get statistics".to_string(),
            ));
        }

        let (start, end) = match (self.session_start_time, self.performances.last()) {
            (Some(start), Some(last)) => (start, last.responded_at()),
            _ => {
                return Err(MajorError::InvalidState(
                    "completed session has no recorded performances".to_string(),
                ))
            }
        };
        SessionStatistics::new(&self.performances, start, end)
    }

    fn present_next(&mut self) {
        if let Some(number) = self.remaining.pop_front() {
            self.current = Some((number, self.clock.now()));
        }
    }

    fn complete(&mut self) {
        self.current = None;
        self.state = SessionState::Completed;
        info!(
            range_start = %self.range_start,
            range_end = %self.range_end,
            completed = self.performances.len(),
            "session completed"
        );
    }

    pub fn range_start(&self) -> &str {
        &self.range_start
    }

    pub fn range_end(&self) -> &str {
        &self.range_end
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_number(&self) -> Option<MajorNumber> {
        self.current.map(|(n, _)| n)
    }

    /// When the current number went on screen
    pub fn current_presented_at(&self) -> Option<DateTime<Utc>> {
        self.current.map(|(_, t)| t)
    }

    pub fn total_numbers(&self) -> usize {
        self.total_numbers
    }

    pub fn completed_numbers(&self) -> usize {
        self.performances.len()
    }

    pub fn remaining_numbers(&self) -> usize {
        self.remaining.len() + usize::from(self.current.is_some())
    }

    pub fn performances(&self) -> &[NumberPerformance] {
        &self.performances
    }

    pub fn session_start_time(&self) -> Option<DateTime<Utc>> {
        self.session_start_time
    }

    /// Fraction of numbers already recalled, 0.0..=1.0
    pub fn progress(&self) -> f64 {
        if self.total_numbers == 0 {
            return 0.0;
        }
        self.completed_numbers() as f64 / self.total_numbers as f64
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
