//! Error types for the simulation core.
//!
//! The simulation itself has no recoverable failure modes: positions
//! clamp, stale removals no-op, negative quantities saturate at zero.
//! Errors here cover host-facing misuse of the API surface.

use thiserror::Error;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Top-level error type for the simulation core.
#[derive(Debug, Error)]
pub enum GameError {
    /// Unknown game mode selector from the startup prompt.
    #[error("Invalid mode selector: {0} (expected 1, 2, or 3)")]
    InvalidMode(u8),

    /// Lookup of a combatant id that was never issued.
    #[error("Combatant not found: {0}")]
    CombatantNotFound(u64),
}
