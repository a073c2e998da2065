// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod card;
pub mod config;
pub mod deck;
pub mod loader;
pub mod runtime;
pub mod score;
pub mod session;
pub mod ui;

/// Render loop cadence; the feedback countdown and cursor blink are
/// measured in these ticks, not wall-clock time.
pub const TICK_RATE_MS: u64 = 100;
