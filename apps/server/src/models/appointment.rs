//! Appointment options and bookings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A treatment type with its bookable time slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentOption {
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Treatment name; bookings reference the option through this value
    pub name: String,

    /// Slot labels in display order (e.g. "08.00 AM - 08.30 AM")
    pub slots: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Seed entry for the appointment catalog (no id yet).
#[derive(Debug, Clone, Deserialize)]
pub struct NewAppointmentOption {
    pub name: String,
    pub slots: Vec<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Projection of an option down to its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialty {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
}

/// A patient's reservation of one slot for a treatment on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub treatment: String,
    pub appointment_date: String,
    pub slot: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Booking request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub treatment: String,
    pub appointment_date: String,
    pub slot: String,
    pub email: String,
    #[serde(default)]
    pub patient: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl NewBooking {
    pub fn validate(&self) -> crate::Result<()> {
        let required = [
            ("treatment", &self.treatment),
            ("appointmentDate", &self.appointment_date),
            ("slot", &self.slot),
            ("email", &self.email),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(crate::Error::Validation(format!("{field} is required")));
            }
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(crate::Error::Validation(
                    "price must be a non-negative number".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn into_booking(self, id: Uuid, created_at: DateTime<Utc>) -> Booking {
        Booking {
            id,
            treatment: self.treatment,
            appointment_date: self.appointment_date,
            slot: self.slot,
            email: self.email,
            patient: self.patient,
            phone: self.phone,
            price: self.price,
            created_at,
        }
    }
}
