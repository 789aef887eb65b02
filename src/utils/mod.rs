mod maths_utils;
mod time_utils;

pub use time_utils::epoch_ms_to_time_string;

pub(crate) use maths_utils::pct_of;
