use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EditStateError;

/// Per-bill edit lifecycle state.
///
/// The state machine progresses through these states:
/// - Idle: no edit surface open for the bill
/// - Editing: the edit surface is open, mutations and Save are allowed
/// - Saving: a save is in flight, further Save triggers are rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditState {
    Idle,
    Editing,
    Saving,
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditState::Idle => write!(f, "idle"),
            EditState::Editing => write!(f, "editing"),
            EditState::Saving => write!(f, "saving"),
        }
    }
}

/// Events that drive the edit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditEvent {
    /// The edit surface opened.
    Open,

    /// The user triggered Save.
    SaveRequested,

    /// The transport call resolved successfully.
    SaveSucceeded,

    /// The transport call failed or validation aborted the save.
    SaveFailed,

    /// The edit surface closed, discarding unsaved local state.
    Close,
}

impl fmt::Display for EditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditEvent::Open => write!(f, "open"),
            EditEvent::SaveRequested => write!(f, "save_requested"),
            EditEvent::SaveSucceeded => write!(f, "save_succeeded"),
            EditEvent::SaveFailed => write!(f, "save_failed"),
            EditEvent::Close => write!(f, "close"),
        }
    }
}

/// Trait for transitions in the edit lifecycle state machine.
pub trait Transition {
    /// Determines the next state for an event, rejecting events the
    /// current state does not allow.
    fn transition(current: EditState, event: EditEvent) -> Result<EditState, EditStateError>;

    /// Initial state before any surface opens.
    fn initial_state() -> EditState {
        EditState::Idle
    }
}

/// Edit lifecycle guard.
///
/// Save is only invokable from Editing; a save in flight rejects further
/// Save triggers until the transport call resolves to Idle (success) or
/// back to Editing (failure).
pub struct EditGuard;

impl Transition for EditGuard {
    fn transition(current: EditState, event: EditEvent) -> Result<EditState, EditStateError> {
        match (current, event) {
            (_, EditEvent::Close) => Ok(EditState::Idle),
            (EditState::Idle, EditEvent::Open) => Ok(EditState::Editing),
            (EditState::Editing, EditEvent::Open) => Ok(EditState::Editing),
            (EditState::Editing, EditEvent::SaveRequested) => Ok(EditState::Saving),
            (EditState::Saving, EditEvent::SaveRequested) => Err(EditStateError::SaveInFlight),
            (EditState::Saving, EditEvent::SaveSucceeded) => Ok(EditState::Idle),
            (EditState::Saving, EditEvent::SaveFailed) => Ok(EditState::Editing),
            _ => Err(EditStateError::NotEditing),
        }
    }
}
