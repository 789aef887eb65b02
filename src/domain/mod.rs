mod digit;
mod tick;

pub use digit::last_digit;
pub use tick::Tick;
