use serde::{Deserialize, Serialize};

use crate::core::{Piece, Rotation};

/// Number of pieces dealt at once.
pub const TRAY_SIZE: usize = 3;

/// Why a tray slot cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TraySlotError {
    #[display("tray slot {index} is out of range (0..3)")]
    OutOfRange { index: usize },
    #[display("tray slot {index} has already been used")]
    AlreadyUsed { index: usize },
}

/// The pieces currently offered to the player.
///
/// Each slot holds a piece until it is placed; the tray is only refilled as a
/// whole, once every slot is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tray {
    slots: [Option<Piece>; TRAY_SIZE],
}

impl Tray {
    #[must_use]
    pub const fn new(pieces: [Piece; TRAY_SIZE]) -> Self {
        let [a, b, c] = pieces;
        Self {
            slots: [Some(a), Some(b), Some(c)],
        }
    }

    /// Builds a tray where `None` marks an already used slot.
    #[must_use]
    pub const fn from_slots(slots: [Option<Piece>; TRAY_SIZE]) -> Self {
        Self { slots }
    }

    #[must_use]
    pub const fn slots(&self) -> &[Option<Piece>; TRAY_SIZE] {
        &self.slots
    }

    /// Returns the piece in slot `index`.
    pub fn slot(&self, index: usize) -> Result<&Piece, TraySlotError> {
        self.slots
            .get(index)
            .ok_or(TraySlotError::OutOfRange { index })?
            .as_ref()
            .ok_or(TraySlotError::AlreadyUsed { index })
    }

    /// Iterates over the unused slots as `(index, piece)`.
    pub fn unused_pieces(&self) -> impl Iterator<Item = (usize, &Piece)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|piece| (index, piece)))
    }

    /// Returns `true` when every slot has been used.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Removes the piece from slot `index`, marking it used.
    pub fn take(&mut self, index: usize) -> Result<Piece, TraySlotError> {
        self.slots
            .get_mut(index)
            .ok_or(TraySlotError::OutOfRange { index })?
            .take()
            .ok_or(TraySlotError::AlreadyUsed { index })
    }

    /// Rotates every unused piece by a quarter turn.
    pub fn rotate_all(&mut self, rotation: Rotation) {
        for piece in self.slots.iter_mut().flatten() {
            *piece = piece.rotated(rotation);
        }
    }

    /// Rotates the piece in slot `index` by a quarter turn.
    pub fn rotate_slot(&mut self, index: usize, rotation: Rotation) -> Result<(), TraySlotError> {
        let piece = self
            .slots
            .get_mut(index)
            .ok_or(TraySlotError::OutOfRange { index })?
            .as_mut()
            .ok_or(TraySlotError::AlreadyUsed { index })?;
        *piece = piece.rotated(rotation);
        Ok(())
    }
}
