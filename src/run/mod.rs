//! Run orchestration: timed stress-test execution and run history.

pub mod history;
pub mod service;

pub use history::RunHistory;
pub use service::{StressTestRun, StressTestRunner};
