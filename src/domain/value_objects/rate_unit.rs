//! Rate unit value object module
//!
//! Defines the dimension attached to a time value on an operation (setup,
//! labor, machine) that determines how the value scales with quantity.

use serde::{Deserialize, Serialize};

/// The unit a recorded time value is expressed in.
///
/// Each variant fixes how `(time, quantity)` is converted to hours; see
/// [`RateUnit::to_hours`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RateUnit {
    TotalHours,
    TotalMinutes,
    HoursPerPiece,
    HoursPer100Pieces,
    HoursPer1000Pieces,
    MinutesPerPiece,
    MinutesPer100Pieces,
    MinutesPer1000Pieces,
    SecondsPerPiece,
    PiecesPerHour,
    PiecesPerMinute,
}

impl RateUnit {
    /// Converts `(time, quantity)` to hours under this unit's semantics.
    ///
    /// `quantity <= 0` behaves as `quantity = 1` would in the piece-scaled
    /// variants only inasmuch as the caller is expected to default a missing
    /// quantity to `1` before calling; this method takes quantity as given.
    /// The `Pieces/Hour` and `Pieces/Minute` variants return `0.0` when
    /// `time <= 0` to avoid dividing by a non-positive rate.
    pub fn to_hours(self, time: f64, quantity: f64) -> f64 {
        match self {
            RateUnit::TotalHours => time,
            RateUnit::TotalMinutes => time / 60.0,
            RateUnit::HoursPerPiece => time * quantity,
            RateUnit::HoursPer100Pieces => time * quantity / 100.0,
            RateUnit::HoursPer1000Pieces => time * quantity / 1000.0,
            RateUnit::MinutesPerPiece => time * quantity / 60.0,
            RateUnit::MinutesPer100Pieces => time * quantity / 6000.0,
            RateUnit::MinutesPer1000Pieces => time * quantity / 60000.0,
            RateUnit::SecondsPerPiece => time * quantity / 3600.0,
            RateUnit::PiecesPerHour => {
                if time <= 0.0 {
                    0.0
                } else {
                    quantity / time
                }
            }
            RateUnit::PiecesPerMinute => {
                if time <= 0.0 {
                    0.0
                } else {
                    quantity / (time * 60.0)
                }
            }
        }
    }
}
