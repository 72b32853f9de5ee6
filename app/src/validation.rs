//! Seat bounds for tickets.
//!
//! The same check runs in two places: the order service calls it before a
//! transaction is opened, and the ticket entity calls it from its
//! `before_save` hook so nothing out of range ever reaches the table.

use crate::entities::airplanes;
use crate::error::{BookingError, FieldErrors};
use sea_orm::DbErr;
use std::fmt;

const DB_ERR_PREFIX: &str = "ticket validation failed on ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRangeError {
    pub field: &'static str,
    pub message: String,
}

impl TicketRangeError {
    /// Wrap for the model layer, where only `DbErr` can be returned.
    pub fn into_db_err(self) -> DbErr {
        DbErr::Custom(format!("{DB_ERR_PREFIX}{}: {}", self.field, self.message))
    }

    /// Recover a range error that crossed the model layer as a `DbErr`.
    pub fn from_db_err(err: &DbErr) -> Option<Self> {
        let DbErr::Custom(text) = err else {
            return None;
        };
        let (field, message) = text.strip_prefix(DB_ERR_PREFIX)?.split_once(": ")?;
        let field = match field {
            "row" => "row",
            "seat" => "seat",
            _ => return None,
        };
        Some(Self {
            field,
            message: message.to_string(),
        })
    }
}

impl fmt::Display for TicketRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl From<TicketRangeError> for BookingError {
    fn from(err: TicketRangeError) -> Self {
        Self::Validation(FieldErrors::single(err.field, err.message))
    }
}

/// Check that `row` and `seat` both fall inside the airplane's layout.
///
/// Rows are checked first; the error names the first offending field.
pub fn validate_ticket(
    row: i32,
    seat: i32,
    airplane: &airplanes::Model,
) -> Result<(), TicketRangeError> {
    for (value, field, airplane_attr, max) in [
        (row, "row", "rows", airplane.rows),
        (seat, "seat", "seats_in_row", airplane.seats_in_row),
    ] {
        if !(1..=max).contains(&value) {
            return Err(TicketRangeError {
                field,
                message: format!(
                    "{field} number must be in available range: (1, {airplane_attr}): (1, {max})"
                ),
            });
        }
    }
    Ok(())
}

pub const MAX_NAME_LEN: usize = 255;

/// Non-blank text of at most `MAX_NAME_LEN` characters.
pub fn check_text(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "This field may not be blank.");
    } else if value.chars().count() > MAX_NAME_LEN {
        errors.add(
            field,
            format!("Ensure this field has no more than {MAX_NAME_LEN} characters."),
        );
    }
}

pub fn check_min(errors: &mut FieldErrors, field: &str, value: i32, min: i32) {
    if value < min {
        errors.add(
            field,
            format!("Ensure this value is greater than or equal to {min}."),
        );
    }
}

/// Message for a foreign key that points nowhere.
pub fn invalid_pk(id: i32) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}
