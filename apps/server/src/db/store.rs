//! PostgreSQL implementation of [`ClinicStore`]

use crate::{
    db::ClinicStore,
    models::{
        AppointmentOption, Booking, DeleteResult, Doctor, NewAppointmentOption, NewBooking,
        NewDoctor, NewUser, Role, Specialty, UpdateResult, User,
    },
    Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value as JsonValue};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

const BOOKING_COLUMNS: &str =
    "id, treatment, appointment_date, slot, email, patient, phone, price, created_at";

#[derive(Clone)]
pub struct PostgresClinicStore {
    pool: PgPool,
}

impl PostgresClinicStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn option_from_row(row: &PgRow) -> AppointmentOption {
    AppointmentOption {
        id: row.get("id"),
        name: row.get("name"),
        slots: row.get("slots"),
        price: row.get("price"),
    }
}

fn booking_from_row(row: &PgRow) -> Booking {
    Booking {
        id: row.get("id"),
        treatment: row.get("treatment"),
        appointment_date: row.get("appointment_date"),
        slot: row.get("slot"),
        email: row.get("email"),
        patient: row.get("patient"),
        phone: row.get("phone"),
        price: row.get("price"),
        created_at: row.get("created_at"),
    }
}

fn user_from_row(row: &PgRow) -> User {
    let role: Option<String> = row.get("role");
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        role: role.as_deref().and_then(Role::parse),
        created_at: row.get("created_at"),
    }
}

fn doctor_from_row(row: &PgRow) -> Doctor {
    let details = match row.get::<JsonValue, _>("details") {
        JsonValue::Object(map) => map,
        _ => Map::new(),
    };
    Doctor {
        id: row.get("id"),
        name: row.get("name"),
        details,
    }
}

#[async_trait]
impl ClinicStore for PostgresClinicStore {
    async fn list_appointment_options(&self) -> Result<Vec<AppointmentOption>> {
        let rows = sqlx::query(
            "SELECT id, name, slots, price FROM appointment_options ORDER BY sort_order",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(option_from_row).collect())
    }

    async fn list_specialties(&self) -> Result<Vec<Specialty>> {
        let rows = sqlx::query("SELECT id, name FROM appointment_options ORDER BY sort_order")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| Specialty {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }

    async fn count_appointment_options(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM appointment_options")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn seed_appointment_options(&self, options: Vec<NewAppointmentOption>) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for option in options {
            let result = sqlx::query(
                r#"
                INSERT INTO appointment_options (id, name, slots, price)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&option.name)
            .bind(&option.slots)
            .bind(option.price)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn set_price_on_all_options(&self, price: f64) -> Result<UpdateResult> {
        let (matched, modified): (i64, i64) = sqlx::query_as(
            r#"
            WITH updated AS (
                UPDATE appointment_options
                SET price = $1
                WHERE price IS DISTINCT FROM $1
                RETURNING id
            )
            SELECT
                (SELECT COUNT(*) FROM appointment_options) AS matched,
                (SELECT COUNT(*) FROM updated) AS modified
            "#,
        )
        .bind(price)
        .fetch_one(&self.pool)
        .await?;

        Ok(UpdateResult::new(matched as u64, modified as u64))
    }

    async fn bookings_on_date(&self, date: &str) -> Result<Vec<Booking>> {
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE appointment_date = $1 ORDER BY created_at"
        );
        let rows = sqlx::query(&query)
            .bind(date)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(booking_from_row).collect())
    }

    async fn bookings_for_email(&self, email: &str) -> Result<Vec<Booking>> {
        let query =
            format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE email = $1 ORDER BY created_at");
        let rows = sqlx::query(&query)
            .bind(email)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(booking_from_row).collect())
    }

    async fn find_booking(&self, id: Uuid) -> Result<Option<Booking>> {
        let query = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(booking_from_row))
    }

    async fn insert_booking(&self, booking: NewBooking) -> Result<Option<Booking>> {
        let id = Uuid::new_v4();
        // The unique constraint makes check-and-insert a single statement.
        let created_at: Option<DateTime<Utc>> = sqlx::query_scalar(
            r#"
            INSERT INTO bookings
                (id, treatment, appointment_date, slot, email, patient, phone, price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT ON CONSTRAINT bookings_slot_unique DO NOTHING
            RETURNING created_at
            "#,
        )
        .bind(id)
        .bind(&booking.treatment)
        .bind(&booking.appointment_date)
        .bind(&booking.slot)
        .bind(&booking.email)
        .bind(&booking.patient)
        .bind(&booking.phone)
        .bind(booking.price)
        .fetch_optional(&self.pool)
        .await?;

        Ok(created_at.map(|created_at| booking.into_booking(id, created_at)))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let rows =
            sqlx::query("SELECT id, name, email, role, created_at FROM users ORDER BY created_at")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row =
            sqlx::query("SELECT id, name, email, role, created_at FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn insert_user(&self, user: NewUser) -> Result<Option<User>> {
        let id = Uuid::new_v4();
        let created_at: Option<DateTime<Utc>> = sqlx::query_scalar(
            r#"
            INSERT INTO users (id, name, email)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING created_at
            "#,
        )
        .bind(id)
        .bind(&user.name)
        .bind(&user.email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(created_at.map(|created_at| user.into_user(id, created_at)))
    }

    async fn grant_admin(&self, id: Uuid) -> Result<UpdateResult> {
        let (matched, modified): (i64, i64) = sqlx::query_as(
            r#"
            WITH target AS (
                SELECT id, role FROM users WHERE id = $1
            ),
            updated AS (
                UPDATE users
                SET role = $2
                WHERE id IN (SELECT id FROM target WHERE role IS DISTINCT FROM $2)
                RETURNING id
            )
            SELECT
                (SELECT COUNT(*) FROM target) AS matched,
                (SELECT COUNT(*) FROM updated) AS modified
            "#,
        )
        .bind(id)
        .bind(Role::Admin.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(UpdateResult::new(matched as u64, modified as u64))
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        let rows = sqlx::query("SELECT id, name, details FROM doctors ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(doctor_from_row).collect())
    }

    async fn insert_doctor(&self, doctor: NewDoctor) -> Result<Doctor> {
        let id = Uuid::new_v4();
        let (name, details) = doctor.into_parts();

        sqlx::query("INSERT INTO doctors (id, name, details) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(&name)
            .bind(JsonValue::Object(details.clone()))
            .execute(&self.pool)
            .await?;

        Ok(Doctor { id, name, details })
    }

    async fn delete_doctor(&self, id: Uuid) -> Result<DeleteResult> {
        let result = sqlx::query("DELETE FROM doctors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(DeleteResult::new(result.rows_affected()))
    }
}
