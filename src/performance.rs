use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::{MajorError, Result};
use crate::major_number::MajorNumber;

/// One presented number and how long the recall took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberPerformance {
    number: MajorNumber,
    presented_at: DateTime<Utc>,
    responded_at: DateTime<Utc>,
    response_time: Duration,
}

impl NumberPerformance {
    pub fn new(
        number: MajorNumber,
        presented_at: DateTime<Utc>,
        responded_at: DateTime<Utc>,
    ) -> Result<Self> {
        let response_time = (responded_at - presented_at).to_std().map_err(|_| {
            MajorError::InvalidArgument(
                "response time cannot be before presentation time".to_string(),
            )
        })?;

        Ok(Self {
            number,
            presented_at,
            responded_at,
            response_time,
        })
    }

    pub fn number(&self) -> MajorNumber {
        self.number
    }

    pub fn presented_at(&self) -> DateTime<Utc> {
        self.presented_at
    }

    pub fn responded_at(&self) -> DateTime<Utc> {
        self.responded_at
    }

    pub fn response_time(&self) -> Duration {
        self.response_time
    }

    pub fn response_ms(&self) -> f64 {
        crate::util::as_millis_f64(self.response_time)
    }
}
