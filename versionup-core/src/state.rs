// Copyright 2025 VersionUp Contributors (https://github.com/versionup/versionup)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Arming state machine for the save timer.

use thiserror::Error;

/// Whether a save timer is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmState {
    /// No timer pending: no open document, or the saver was stopped.
    IdleWait,
    /// A timer is scheduled.
    Armed,
}

impl ArmState {
    pub fn is_armed(self) -> bool {
        matches!(self, ArmState::Armed)
    }
}

/// Events that move the arming machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmEvent {
    /// A document loaded or was saved while open; the timer (re)arms.
    DocumentReady,
    /// The pending timer fired; the cycle rearms after handling.
    TimerFired,
    /// The document closed or the saver stopped.
    DocumentClosed,
}

#[derive(Debug, Error)]
#[error("Invalid transition: {current:?} -> {event:?}")]
pub struct InvalidTransition {
    pub current: ArmState,
    pub event: ArmEvent,
}

impl ArmState {
    /// Apply an event.
    ///
    /// A `TimerFired` in `IdleWait` is a stale fire from before a stop and
    /// is rejected; callers drop the fire on the floor.
    pub fn transition(self, event: ArmEvent) -> Result<ArmState, InvalidTransition> {
        use ArmEvent::*;
        use ArmState::*;

        let next = match (self, event) {
            (_, DocumentReady) => Armed,
            (Armed, TimerFired) => Armed,
            (_, DocumentClosed) => IdleWait,
            _ => {
                return Err(InvalidTransition {
                    current: self,
                    event,
                })
            }
        };

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_ready_arms_from_either_state() {
        assert_eq!(
            ArmState::IdleWait.transition(ArmEvent::DocumentReady).unwrap(),
            ArmState::Armed
        );
        assert_eq!(
            ArmState::Armed.transition(ArmEvent::DocumentReady).unwrap(),
            ArmState::Armed
        );
    }

    #[test]
    fn test_timer_fire_keeps_armed() {
        assert_eq!(
            ArmState::Armed.transition(ArmEvent::TimerFired).unwrap(),
            ArmState::Armed
        );
    }

    #[test]
    fn test_timer_fire_while_idle_is_invalid() {
        let err = ArmState::IdleWait
            .transition(ArmEvent::TimerFired)
            .unwrap_err();
        assert_eq!(err.current, ArmState::IdleWait);
        assert_eq!(err.event, ArmEvent::TimerFired);
    }

    #[test]
    fn test_close_disarms() {
        assert_eq!(
            ArmState::Armed.transition(ArmEvent::DocumentClosed).unwrap(),
            ArmState::IdleWait
        );
        assert_eq!(
            ArmState::IdleWait
                .transition(ArmEvent::DocumentClosed)
                .unwrap(),
            ArmState::IdleWait
        );
    }
}
