//! Floor-selection session: the small state machine behind the technician's
//! locate interaction. Picking a floor runs the locator; when several risers
//! share the floor the session blocks on an explicit choice instead of
//! guessing.

use thiserror::Error;

use crate::locate::{locate, LocateResult};
use crate::Riser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No floor selected.
    Idle,
    /// A floor is selected; zero risers cover it (or a choice was cancelled).
    FloorSelected,
    /// Two or more risers cover the floor; waiting for the technician.
    AwaitingRiserChoice,
    /// A riser is pinned for the current floor.
    RiserSelected,
}

/// Contract violations. A UI that sticks to the public transitions never
/// produces these.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("{action} is not valid in the {phase:?} phase")]
    InvalidTransition {
        action: &'static str,
        phase: SessionPhase,
    },
    #[error("riser {id} is not on floor {floor}")]
    RiserNotOnFloor { id: i64, floor: i32 },
}

/// One technician's locate interaction over a building's riser snapshot.
///
/// Owned by a single active interaction; all transitions are short pure
/// computations with no I/O. Replacing the snapshot (building changed or
/// re-fetched) resets the session so no stale selection carries over.
#[derive(Debug, Clone)]
pub struct FloorSession {
    risers: Vec<Riser>,
    phase: SessionPhase,
    selected_floor: Option<i32>,
    risers_on_floor: Vec<Riser>,
    selected_riser: Option<Riser>,
    last_locate: LocateResult,
}

impl FloorSession {
    pub fn new(risers: Vec<Riser>) -> Self {
        Self {
            risers,
            phase: SessionPhase::Idle,
            selected_floor: None,
            risers_on_floor: Vec::new(),
            selected_riser: None,
            last_locate: LocateResult::default(),
        }
    }

    /// Replace the riser snapshot and reset to `Idle`.
    pub fn set_risers(&mut self, risers: Vec<Riser>) {
        *self = Self::new(risers);
    }

    /// React to the technician picking a floor, from any phase. Exactly one
    /// covering riser is selected automatically; two or more suspend
    /// selection until [`choose_riser`](Self::choose_riser).
    pub fn select_floor(&mut self, floor: i32) -> &LocateResult {
        self.last_locate = locate(&self.risers, floor);
        self.risers_on_floor = self.last_locate.on_current_floor.clone();
        self.selected_floor = Some(floor);
        self.selected_riser = None;
        self.phase = match self.risers_on_floor.len() {
            0 => SessionPhase::FloorSelected,
            1 => {
                self.selected_riser = Some(self.risers_on_floor[0].clone());
                SessionPhase::RiserSelected
            }
            _ => SessionPhase::AwaitingRiserChoice,
        };
        &self.last_locate
    }

    /// Pin one of the risers offered while awaiting a choice.
    pub fn choose_riser(&mut self, riser_id: i64) -> Result<(), SessionError> {
        if self.phase != SessionPhase::AwaitingRiserChoice {
            return Err(SessionError::InvalidTransition {
                action: "choose_riser",
                phase: self.phase,
            });
        }
        let riser = self
            .risers_on_floor
            .iter()
            .find(|r| r.id == riser_id)
            .cloned()
            .ok_or(SessionError::RiserNotOnFloor {
                id: riser_id,
                floor: self.selected_floor.unwrap_or_default(),
            })?;
        self.selected_riser = Some(riser);
        self.phase = SessionPhase::RiserSelected;
        Ok(())
    }

    /// Decline to disambiguate. The display falls back to the nearest
    /// above/below view; the underlying riser data is untouched.
    pub fn cancel_choice(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::AwaitingRiserChoice {
            return Err(SessionError::InvalidTransition {
                action: "cancel_choice",
                phase: self.phase,
            });
        }
        self.selected_riser = None;
        self.phase = SessionPhase::FloorSelected;
        Ok(())
    }

    /// Re-open the choice for a pinned riser. No-op when the current floor
    /// no longer offers more than one riser.
    pub fn change_selection(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::RiserSelected {
            return Err(SessionError::InvalidTransition {
                action: "change_selection",
                phase: self.phase,
            });
        }
        if self.risers_on_floor.len() >= 2 {
            self.selected_riser = None;
            self.phase = SessionPhase::AwaitingRiserChoice;
        }
        Ok(())
    }

    /// Drop the floor selection entirely (the selector was blanked).
    pub fn clear(&mut self) {
        self.phase = SessionPhase::Idle;
        self.selected_floor = None;
        self.risers_on_floor.clear();
        self.selected_riser = None;
        self.last_locate = LocateResult::default();
    }

    // --- Read accessors ---

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn selected_floor(&self) -> Option<i32> {
        self.selected_floor
    }

    pub fn selected_riser(&self) -> Option<&Riser> {
        self.selected_riser.as_ref()
    }

    pub fn risers_on_floor(&self) -> &[Riser] {
        &self.risers_on_floor
    }

    pub fn locate_result(&self) -> &LocateResult {
        &self.last_locate
    }

    pub fn awaiting_choice(&self) -> bool {
        self.phase == SessionPhase::AwaitingRiserChoice
    }
}
