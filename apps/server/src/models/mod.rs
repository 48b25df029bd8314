//! Domain models for the booking API

pub mod appointment;
pub mod doctor;
pub mod results;
pub mod user;

pub use appointment::{AppointmentOption, Booking, NewAppointmentOption, NewBooking, Specialty};
pub use doctor::{Doctor, NewDoctor};
pub use results::{DeleteResult, InsertResult, Rejected, UpdateResult};
pub use user::{NewUser, Role, User};
