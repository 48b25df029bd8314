use medibook::models::NewAppointmentOption;
use serde_json::{json, Value};

pub const ORTHODONTICS: &str = "Teeth Orthodontics";
pub const CLEANING: &str = "Teeth Cleaning";

pub const SLOT_8: &str = "08.00 AM - 08.30 AM";
pub const SLOT_830: &str = "08.30 AM - 09.00 AM";
pub const SLOT_9: &str = "09.00 AM - 9.30 AM";

pub const DATE: &str = "Jan 5, 2023";

pub fn catalog() -> Vec<NewAppointmentOption> {
    vec![
        NewAppointmentOption {
            name: ORTHODONTICS.to_string(),
            slots: vec![SLOT_8.to_string(), SLOT_830.to_string(), SLOT_9.to_string()],
            price: None,
        },
        NewAppointmentOption {
            name: CLEANING.to_string(),
            slots: vec![SLOT_8.to_string(), SLOT_830.to_string()],
            price: None,
        },
    ]
}

pub fn booking(treatment: &str, date: &str, slot: &str, email: &str) -> Value {
    json!({
        "treatment": treatment,
        "appointmentDate": date,
        "slot": slot,
        "email": email,
        "patient": "Test Patient",
        "phone": "01700000000",
        "price": 99
    })
}
