pub mod backend;
pub mod harness;
pub mod reports;
pub mod tester;

pub use backend::{BackendProfile, FakeBackend};
pub use harness::{Harness, Observation, RunSummary, Step};
pub use tester::*;
