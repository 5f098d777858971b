//! Recording domain: the scheduler-owned signal snapshot, its derived card
//! state, and the visibility filters over it.

pub mod card_state;
pub mod filter;
pub mod recording;

pub use card_state::{CardState, ERROR_STATUSES, StateColor, display_title, title_emphasized};
pub use filter::{StatusFilter, platform_matches, should_show};
pub use recording::{Recording, RecordingStatus};
