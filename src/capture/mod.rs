pub mod screenshot;

pub use screenshot::{grab_region, save_debug_capture};
