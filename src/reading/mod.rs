pub mod ovp;
pub mod state;
pub mod timing;

pub use ovp::anchor_position;
pub use state::ReadingState;
pub use timing::{token_duration_ms, wpm_to_milliseconds};
