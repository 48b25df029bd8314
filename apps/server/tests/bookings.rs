//! Booking and availability tests
//!
//! - One booking per (date, treatment, slot), including under concurrency
//! - Remaining slots per date
//! - Token-gated booking listing

#[allow(unused)]
mod support;

use axum::http::{Method, StatusCode};
use support::{
    assert_status, booking, parse_json, to_json_body, TestApp, CLEANING, DATE, ORTHODONTICS,
    SLOT_8, SLOT_830, SLOT_9,
};

#[tokio::test]
async fn create_booking_returns_insert_result() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let body = booking(ORTHODONTICS, DATE, SLOT_8, "patient@example.com");
    let (status, _headers, body) = app
        .request(Method::POST, "/bookings", Some(to_json_body(&body)?))
        .await?;

    assert_status(status, StatusCode::OK, "create booking");
    let result = parse_json(&body)?;
    assert_eq!(result["acknowledged"], true);
    let id = result["insertedId"].as_str().expect("insertedId");
    assert!(uuid::Uuid::parse_str(id).is_ok(), "insertedId should be a UUID: {id}");

    let (status, _headers, body) = app
        .request(Method::GET, &format!("/booking/{id}"), None)
        .await?;
    assert_status(status, StatusCode::OK, "get booking");
    let stored = parse_json(&body)?;
    assert_eq!(stored["_id"], id);
    assert_eq!(stored["treatment"], ORTHODONTICS);
    assert_eq!(stored["appointmentDate"], DATE);
    assert_eq!(stored["slot"], SLOT_8);

    Ok(())
}

#[tokio::test]
async fn duplicate_slot_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let first = booking(ORTHODONTICS, DATE, SLOT_8, "first@example.com");
    let (status, _, _) = app
        .request(Method::POST, "/bookings", Some(to_json_body(&first)?))
        .await?;
    assert_status(status, StatusCode::OK, "first booking");

    let second = booking(ORTHODONTICS, DATE, SLOT_8, "second@example.com");
    let (status, _, body) = app
        .request(Method::POST, "/bookings", Some(to_json_body(&second)?))
        .await?;
    assert_status(status, StatusCode::OK, "duplicate booking");

    let result = parse_json(&body)?;
    assert_eq!(result["acknowledged"], false);
    assert_eq!(
        result["message"],
        format!("You already have a booking on {DATE}")
    );

    Ok(())
}

#[tokio::test]
async fn same_slot_for_other_treatment_or_date_is_accepted() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    for body in [
        booking(ORTHODONTICS, DATE, SLOT_8, "a@example.com"),
        booking(CLEANING, DATE, SLOT_8, "b@example.com"),
        booking(ORTHODONTICS, "Jan 6, 2023", SLOT_8, "c@example.com"),
    ] {
        let (status, _, body) = app
            .request(Method::POST, "/bookings", Some(to_json_body(&body)?))
            .await?;
        assert_status(status, StatusCode::OK, "booking");
        assert_eq!(parse_json(&body)?["acknowledged"], true);
    }

    Ok(())
}

#[tokio::test]
async fn concurrent_bookings_for_one_slot_store_exactly_one() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let app = &app;

    let requests = (0..10).map(|i| {
        let body = booking(ORTHODONTICS, DATE, SLOT_9, &format!("p{i}@example.com"));
        async move {
            let (status, _, body) = app
                .request(Method::POST, "/bookings", Some(to_json_body(&body)?))
                .await?;
            assert_status(status, StatusCode::OK, "concurrent booking");
            anyhow::Ok(parse_json(&body)?["acknowledged"] == true)
        }
    });

    let outcomes = futures::future::try_join_all(requests).await?;
    assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);

    Ok(())
}

#[tokio::test]
async fn booking_with_missing_fields_is_bad_request() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, _, _) = app
        .request(
            Method::POST,
            "/bookings",
            Some(to_json_body(&serde_json::json!({ "treatment": ORTHODONTICS }))?),
        )
        .await?;
    assert_status(status, StatusCode::BAD_REQUEST, "incomplete booking");

    let mut blank_slot = booking(ORTHODONTICS, DATE, SLOT_8, "patient@example.com");
    blank_slot["slot"] = serde_json::json!("  ");
    let (status, _, body) = app
        .request(Method::POST, "/bookings", Some(to_json_body(&blank_slot)?))
        .await?;
    assert_status(status, StatusCode::BAD_REQUEST, "blank slot");
    assert_eq!(parse_json(&body)?["message"], "slot is required");

    Ok(())
}

#[tokio::test]
async fn available_slots_exclude_booked_ones_for_that_date() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let body = booking(ORTHODONTICS, DATE, SLOT_830, "patient@example.com");
    app.request(Method::POST, "/bookings", Some(to_json_body(&body)?))
        .await?;

    let (status, _, body) = app
        .request(Method::GET, "/appointmentOptions?date=Jan%205%2C%202023", None)
        .await?;
    assert_status(status, StatusCode::OK, "options for booked date");
    let options = parse_json(&body)?;
    let ortho = options
        .as_array()
        .expect("array")
        .iter()
        .find(|o| o["name"] == ORTHODONTICS)
        .expect("orthodontics option");
    assert_eq!(ortho["slots"], serde_json::json!([SLOT_8, SLOT_9]));

    let cleaning = options
        .as_array()
        .expect("array")
        .iter()
        .find(|o| o["name"] == CLEANING)
        .expect("cleaning option");
    assert_eq!(cleaning["slots"], serde_json::json!([SLOT_8, SLOT_830]));

    // Other dates are unaffected.
    let (_, _, body) = app
        .request(Method::GET, "/appointmentOptions?date=Jan%206%2C%202023", None)
        .await?;
    let options = parse_json(&body)?;
    assert_eq!(options[0]["slots"].as_array().map(Vec::len), Some(3));

    Ok(())
}

#[tokio::test]
async fn list_bookings_without_token_is_unauthorized() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, headers, body) = app
        .request(Method::GET, "/bookings?email=patient@example.com", None)
        .await?;
    assert_status(status, StatusCode::UNAUTHORIZED, "bookings without token");
    assert_eq!(&body[..], b"unauthorized access");
    assert!(headers.get("www-authenticate").is_some());

    Ok(())
}

#[tokio::test]
async fn list_bookings_with_invalid_token_is_forbidden() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, _, body) = app
        .request_with_token(
            Method::GET,
            "/bookings?email=patient@example.com",
            None,
            "not-a-token",
        )
        .await?;
    assert_status(status, StatusCode::FORBIDDEN, "bookings with bad token");
    assert_eq!(parse_json(&body)?["message"], "forbidden access");

    Ok(())
}

#[tokio::test]
async fn list_bookings_for_other_email_is_forbidden() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let token = app.sign_in("patient@example.com").await?;

    let (status, _, body) = app
        .request_with_token(
            Method::GET,
            "/bookings?email=someone-else@example.com",
            None,
            &token,
        )
        .await?;
    assert_status(status, StatusCode::FORBIDDEN, "bookings for other email");
    assert_eq!(parse_json(&body)?["message"], "unauthorized access");

    Ok(())
}

#[tokio::test]
async fn list_bookings_returns_only_own_bookings() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let token = app.sign_in("patient@example.com").await?;

    for body in [
        booking(ORTHODONTICS, DATE, SLOT_8, "patient@example.com"),
        booking(CLEANING, DATE, SLOT_8, "patient@example.com"),
        booking(ORTHODONTICS, DATE, SLOT_9, "other@example.com"),
    ] {
        app.request(Method::POST, "/bookings", Some(to_json_body(&body)?))
            .await?;
    }

    let (status, _, body) = app
        .request_with_token(
            Method::GET,
            "/bookings?email=patient@example.com",
            None,
            &token,
        )
        .await?;
    assert_status(status, StatusCode::OK, "own bookings");
    let bookings = parse_json(&body)?;
    let bookings = bookings.as_array().expect("array");
    assert_eq!(bookings.len(), 2);
    assert!(bookings.iter().all(|b| b["email"] == "patient@example.com"));

    Ok(())
}

#[tokio::test]
async fn unknown_booking_is_null() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, _, body) = app
        .request(
            Method::GET,
            &format!("/booking/{}", uuid::Uuid::new_v4()),
            None,
        )
        .await?;
    assert_status(status, StatusCode::OK, "unknown booking");
    assert_eq!(parse_json(&body)?, serde_json::Value::Null);

    let (status, _, _) = app.request(Method::GET, "/booking/not-an-id", None).await?;
    assert_status(status, StatusCode::BAD_REQUEST, "malformed booking id");

    Ok(())
}
