use std::time::Duration;

use super::WindowRange;

// Top Level Constants
/// The buffer always holds enough ticks for the largest range.
pub const BUFFER_CAPACITY: usize = WindowRange::max_size();

/// How often the display loop drains the tick channel.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Trailing categories shown in the terminal view.
pub const RECENT_CATEGORIES_LEN: usize = 10;
