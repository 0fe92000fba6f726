pub mod derivative;
pub mod matrix;
pub mod stats;

pub use derivative::derivative;
pub use matrix::MatrixHelper;
pub use stats::StatsHelper;
