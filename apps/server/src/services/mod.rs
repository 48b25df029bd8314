//! Business logic shared by the handlers

pub mod availability;
pub mod payment;

pub use availability::remaining_slots;
pub use payment::{amount_in_minor_units, PaymentGateway, PaymentIntent, StripeGateway};
