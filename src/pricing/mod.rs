pub mod optimizer;
pub mod undercut;

pub use optimizer::{pick_best_lot, LotRecommendation};
pub use undercut::compute_undercut;
