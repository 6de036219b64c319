pub mod scenario;
pub mod util;

pub use util::{artifacts_dir, capture_artifacts, parse_games, parse_seeds, split_csv};
