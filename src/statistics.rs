use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::{MajorError, Result};
use crate::performance::NumberPerformance;
use crate::util::{from_millis_f64, mean, std_dev};

/// How many of the slowest recalls are kept for review
pub const SLOWEST_LIMIT: usize = 10;

/// Summary of a finished session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatistics {
    pub total_duration: Duration,
    pub average_response_time: Duration,
    /// population std-dev of response times, in milliseconds
    pub response_time_std_dev: f64,
    pub total_numbers: usize,
    pub fastest_response: NumberPerformance,
    pub slowest_response: NumberPerformance,
    /// slowest first, at most `SLOWEST_LIMIT` entries
    pub slowest_responses: Vec<NumberPerformance>,
    /// ascending by number value
    pub all_performances: Vec<NumberPerformance>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl SessionStatistics {
    pub fn new(
        performances: &[NumberPerformance],
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Self> {
        let (first, rest) = performances.split_first().ok_or_else(|| {
            MajorError::InvalidArgument(
                "cannot create statistics from empty performance list".to_string(),
            )
        })?;

        // strict comparisons keep the earliest entry on ties
        let (fastest, slowest) = rest.iter().fold((first, first), |(fast, slow), p| {
            let fast = if p.response_time() < fast.response_time() {
                p
            } else {
                fast
            };
            let slow = if p.response_time() > slow.response_time() {
                p
            } else {
                slow
            };
            (fast, slow)
        });

        let millis: Vec<f64> = performances.iter().map(|p| p.response_ms()).collect();
        let average_response_time = mean(&millis).map(from_millis_f64).unwrap_or_default();
        let response_time_std_dev = std_dev(&millis).unwrap_or(0.0);

        let mut slowest_responses = performances.to_vec();
        slowest_responses.sort_by(|a, b| b.response_time().cmp(&a.response_time()));
        slowest_responses.truncate(SLOWEST_LIMIT);

        let mut all_performances = performances.to_vec();
        all_performances.sort_by_key(|p| p.number().value());

        Ok(Self {
            total_duration: (end_time - start_time).to_std().unwrap_or_default(),
            average_response_time,
            response_time_std_dev,
            total_numbers: performances.len(),
            fastest_response: *fastest,
            slowest_response: *slowest,
            slowest_responses,
            all_performances,
            start_time,
            end_time,
        })
    }
}
