//! In-memory implementation of [`ClinicStore`]
//!
//! Used by the integration tests and for running the API without PostgreSQL.
//! A single lock guards all collections, so booking check-and-insert is atomic.

use crate::{
    db::ClinicStore,
    models::{
        AppointmentOption, Booking, DeleteResult, Doctor, NewAppointmentOption, NewBooking,
        NewDoctor, NewUser, Role, Specialty, UpdateResult, User,
    },
    Result,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Collections {
    options: Vec<AppointmentOption>,
    bookings: Vec<Booking>,
    users: Vec<User>,
    doctors: Vec<Doctor>,
}

#[derive(Clone, Default)]
pub struct InMemoryClinicStore {
    inner: Arc<RwLock<Collections>>,
}

impl InMemoryClinicStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClinicStore for InMemoryClinicStore {
    async fn list_appointment_options(&self) -> Result<Vec<AppointmentOption>> {
        Ok(self.inner.read().await.options.clone())
    }

    async fn list_specialties(&self) -> Result<Vec<Specialty>> {
        let inner = self.inner.read().await;
        Ok(inner
            .options
            .iter()
            .map(|o| Specialty {
                id: o.id,
                name: o.name.clone(),
            })
            .collect())
    }

    async fn count_appointment_options(&self) -> Result<i64> {
        Ok(self.inner.read().await.options.len() as i64)
    }

    async fn seed_appointment_options(&self, options: Vec<NewAppointmentOption>) -> Result<u64> {
        let mut inner = self.inner.write().await;
        let mut inserted = 0;
        for option in options {
            if inner.options.iter().any(|o| o.name == option.name) {
                continue;
            }
            inner.options.push(AppointmentOption {
                id: Uuid::new_v4(),
                name: option.name,
                slots: option.slots,
                price: option.price,
            });
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn set_price_on_all_options(&self, price: f64) -> Result<UpdateResult> {
        let mut inner = self.inner.write().await;
        let matched = inner.options.len() as u64;
        let mut modified = 0;
        for option in inner.options.iter_mut() {
            if option.price != Some(price) {
                option.price = Some(price);
                modified += 1;
            }
        }
        Ok(UpdateResult::new(matched, modified))
    }

    async fn bookings_on_date(&self, date: &str) -> Result<Vec<Booking>> {
        let inner = self.inner.read().await;
        Ok(inner
            .bookings
            .iter()
            .filter(|b| b.appointment_date == date)
            .cloned()
            .collect())
    }

    async fn bookings_for_email(&self, email: &str) -> Result<Vec<Booking>> {
        let inner = self.inner.read().await;
        Ok(inner
            .bookings
            .iter()
            .filter(|b| b.email == email)
            .cloned()
            .collect())
    }

    async fn find_booking(&self, id: Uuid) -> Result<Option<Booking>> {
        let inner = self.inner.read().await;
        Ok(inner.bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn insert_booking(&self, booking: NewBooking) -> Result<Option<Booking>> {
        let mut inner = self.inner.write().await;
        let taken = inner.bookings.iter().any(|b| {
            b.appointment_date == booking.appointment_date
                && b.treatment == booking.treatment
                && b.slot == booking.slot
        });
        if taken {
            return Ok(None);
        }

        let booking = booking.into_booking(Uuid::new_v4(), Utc::now());
        inner.bookings.push(booking.clone());
        Ok(Some(booking))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<Option<User>> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.email == user.email) {
            return Ok(None);
        }
        let user = user.into_user(Uuid::new_v4(), Utc::now());
        inner.users.push(user.clone());
        Ok(Some(user))
    }

    async fn grant_admin(&self, id: Uuid) -> Result<UpdateResult> {
        let mut inner = self.inner.write().await;
        let Some(user) = inner.users.iter_mut().find(|u| u.id == id) else {
            return Ok(UpdateResult::new(0, 0));
        };
        if user.is_admin() {
            return Ok(UpdateResult::new(1, 0));
        }
        user.role = Some(Role::Admin);
        Ok(UpdateResult::new(1, 1))
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        Ok(self.inner.read().await.doctors.clone())
    }

    async fn insert_doctor(&self, doctor: NewDoctor) -> Result<Doctor> {
        let (name, details) = doctor.into_parts();
        let doctor = Doctor {
            id: Uuid::new_v4(),
            name,
            details,
        };
        self.inner.write().await.doctors.push(doctor.clone());
        Ok(doctor)
    }

    async fn delete_doctor(&self, id: Uuid) -> Result<DeleteResult> {
        let mut inner = self.inner.write().await;
        let before = inner.doctors.len();
        inner.doctors.retain(|d| d.id != id);
        Ok(DeleteResult::new((before - inner.doctors.len()) as u64))
    }
}
