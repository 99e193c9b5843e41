mod state;

pub use state::{CompletedStreak, StreakState};
