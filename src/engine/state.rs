use std::sync::Arc;

use crate::models::ScopeSnapshot;

/// Per-session derived state.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// THE FRONT BUFFER.
    /// The display reads this between recomputes. When a new snapshot
    /// is ready we simply replace the Arc pointer; the old one stays
    /// valid for whoever is still holding it.
    pub snapshot: Option<Arc<ScopeSnapshot>>,

    /// Last boundary rejection (malformed quote), shown as a warning
    /// without interrupting the stale display.
    pub last_error: Option<String>,
}
