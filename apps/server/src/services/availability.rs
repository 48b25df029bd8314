//! Slot availability for a given date

use crate::models::{AppointmentOption, Booking};
use std::collections::{HashMap, HashSet};

/// Remove from each option every slot already booked for that treatment.
///
/// `bookings` must all belong to the same date. Slot order is preserved and
/// bookings whose treatment matches no option are ignored.
pub fn remaining_slots(
    mut options: Vec<AppointmentOption>,
    bookings: &[Booking],
) -> Vec<AppointmentOption> {
    let mut booked: HashMap<&str, HashSet<&str>> = HashMap::new();
    for booking in bookings {
        booked
            .entry(booking.treatment.as_str())
            .or_default()
            .insert(booking.slot.as_str());
    }

    for option in &mut options {
        if let Some(taken) = booked.get(option.name.as_str()) {
            option.slots.retain(|slot| !taken.contains(slot.as_str()));
        }
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn option(name: &str, slots: &[&str]) -> AppointmentOption {
        AppointmentOption {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slots: slots.iter().map(|s| s.to_string()).collect(),
            price: None,
        }
    }

    fn booking(treatment: &str, slot: &str) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            treatment: treatment.to_string(),
            appointment_date: "Oct 17, 2026".to_string(),
            slot: slot.to_string(),
            email: "patient@example.com".to_string(),
            patient: None,
            phone: None,
            price: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn removes_booked_slots_for_matching_treatment_only() {
        let options = vec![
            option("Teeth Cleaning", &["08.00", "08.30", "09.00"]),
            option("Cavity Protection", &["08.00", "08.30"]),
        ];
        let bookings = vec![booking("Teeth Cleaning", "08.30")];

        let result = remaining_slots(options, &bookings);

        assert_eq!(result[0].slots, vec!["08.00", "09.00"]);
        assert_eq!(result[1].slots, vec!["08.00", "08.30"]);
    }

    #[test]
    fn no_bookings_leaves_options_untouched() {
        let options = vec![option("Teeth Cleaning", &["08.00", "08.30"])];
        let result = remaining_slots(options.clone(), &[]);
        assert_eq!(result, options);
    }

    #[test]
    fn fully_booked_option_has_no_slots() {
        let options = vec![option("Teeth Cleaning", &["08.00", "08.30"])];
        let bookings = vec![
            booking("Teeth Cleaning", "08.30"),
            booking("Teeth Cleaning", "08.00"),
        ];
        let result = remaining_slots(options, &bookings);
        assert!(result[0].slots.is_empty());
    }

    #[test]
    fn unknown_treatment_is_ignored() {
        let options = vec![option("Teeth Cleaning", &["08.00"])];
        let bookings = vec![booking("Root Canal", "08.00")];
        let result = remaining_slots(options, &bookings);
        assert_eq!(result[0].slots, vec!["08.00"]);
    }
}
