// Library surface shared by the binary and the integration tests.
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod major_number;
pub mod memorization;
pub mod mnemonic;
pub mod performance;
pub mod presets;
pub mod runtime;
pub mod sequence;
pub mod session;
pub mod statistics;
pub mod telemetry;
pub mod util;

pub use error::{MajorError, Result};
pub use major_number::MajorNumber;
pub use performance::NumberPerformance;
pub use sequence::{generate_sequence, NumberFormat, NumberSequence};
pub use session::{GameSession, SessionState};
pub use statistics::SessionStatistics;
