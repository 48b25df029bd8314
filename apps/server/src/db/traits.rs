//! Storage trait for the booking API

use crate::{
    models::{
        AppointmentOption, Booking, DeleteResult, Doctor, NewAppointmentOption, NewBooking,
        NewDoctor, NewUser, Specialty, UpdateResult, User,
    },
    Result,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Storage operations behind every route.
///
/// Implemented by [`PostgresClinicStore`](super::PostgresClinicStore) for
/// production and [`InMemoryClinicStore`](super::InMemoryClinicStore) for
/// tests and local runs.
#[async_trait]
pub trait ClinicStore: Send + Sync {
    /// All appointment options in catalog order
    async fn list_appointment_options(&self) -> Result<Vec<AppointmentOption>>;

    /// Id and name of every option
    async fn list_specialties(&self) -> Result<Vec<Specialty>>;

    async fn count_appointment_options(&self) -> Result<i64>;

    /// Insert catalog entries, skipping names that already exist.
    ///
    /// Returns the number of options inserted.
    async fn seed_appointment_options(&self, options: Vec<NewAppointmentOption>) -> Result<u64>;

    /// Set `price` on every option
    async fn set_price_on_all_options(&self, price: f64) -> Result<UpdateResult>;

    /// Bookings whose `appointmentDate` equals `date`
    async fn bookings_on_date(&self, date: &str) -> Result<Vec<Booking>>;

    async fn bookings_for_email(&self, email: &str) -> Result<Vec<Booking>>;

    async fn find_booking(&self, id: Uuid) -> Result<Option<Booking>>;

    /// Record a booking unless its (date, treatment, slot) is already taken.
    ///
    /// The check and the insert are a single atomic step.
    ///
    /// # Returns
    /// * `Ok(Some(booking))` - booking stored
    /// * `Ok(None)` - the slot was already booked; nothing written
    async fn insert_booking(&self, booking: NewBooking) -> Result<Option<Booking>>;

    async fn list_users(&self) -> Result<Vec<User>>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Store a user; `Ok(None)` when the email is already registered.
    async fn insert_user(&self, user: NewUser) -> Result<Option<User>>;

    /// Give the user the admin role.
    ///
    /// Unknown ids match nothing; no user is created.
    async fn grant_admin(&self, id: Uuid) -> Result<UpdateResult>;

    async fn list_doctors(&self) -> Result<Vec<Doctor>>;

    async fn insert_doctor(&self, doctor: NewDoctor) -> Result<Doctor>;

    async fn delete_doctor(&self, id: Uuid) -> Result<DeleteResult>;
}
