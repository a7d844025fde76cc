//! Per-unit lifecycle state machine.
//!
//! This module provides a pure, side-effect-free state machine for the
//! lifecycle of one unit within one direction of a sync run. The machine
//! takes events as input and produces the next state.
//!
//! The actual transform work is performed by `transform-pipeline`, not by
//! this module. This enables instant unit testing without mocks.

use transform_types::Direction;

/// The lifecycle state of one unit - NO I/O, just state transitions.
///
/// Eligible units move `Untransformed` → `Transformed` when an operation
/// emits output, or `Untransformed` → `Suppressed` when a one-way transform
/// refuses to propagate in its inverse direction. Ineligible units stay
/// `Untransformed` and pass through. No other transitions exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitState {
    /// The unit has not been acted on.
    #[default]
    Untransformed,
    /// A transformer emitted a replacement for this unit.
    Transformed,
    /// Propagation was intentionally suppressed; the unit is dropped
    /// from this direction.
    Suppressed,
}

/// Events in the lifecycle of one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitEvent {
    /// No registered transformer was eligible for this unit.
    PassedThrough,
    /// An eligible transformer emitted a replacement unit.
    Emitted {
        /// Which direction the emit happened in.
        direction: Direction,
    },
    /// An eligible transformer suppressed propagation.
    Suppressed {
        /// Which direction the suppression happened in.
        direction: Direction,
    },
}

impl UnitState {
    /// Create a new state machine in the Untransformed state.
    pub fn new() -> Self {
        Self::Untransformed
    }

    /// Process an event and return the next state.
    ///
    /// This is a pure function. Invalid transitions (events arriving after
    /// the unit is already terminal) leave the state unchanged.
    pub fn on_event(self, event: UnitEvent) -> Self {
        match (self, event) {
            (Self::Untransformed, UnitEvent::PassedThrough) => Self::Untransformed,
            (Self::Untransformed, UnitEvent::Emitted { .. }) => Self::Transformed,
            (Self::Untransformed, UnitEvent::Suppressed { .. }) => Self::Suppressed,

            // Terminal states: stay put
            (state, _) => state,
        }
    }

    /// Check whether this unit still carries its original content.
    pub fn is_untransformed(&self) -> bool {
        matches!(self, Self::Untransformed)
    }

    /// Check whether this unit has been dropped from its direction.
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed)
    }
}
