mod core;
mod state;

pub use self::core::ScopeEngine;
pub use state::SessionState;
