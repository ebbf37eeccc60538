//! Page handlers.
//!
//! Handlers build the page-specific [`TemplateData`] and hand it to the
//! renderer once per request. Form posts follow post-redirect-get: push a
//! one-shot message, stash anything the next page needs in the session,
//! redirect.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use crate::{
    error::{Error, Result},
    models::{Reservation, TemplateData},
    session::{CsrfToken, Flash, FlashKind},
    state::AppState,
};

const RESERVATION_SESSION_KEY: &str = "reservation";

pub async fn home(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    csrf: CsrfToken,
) -> Result<impl IntoResponse> {
    state
        .renderer()
        .render(&session, &csrf, "home.page.html", TemplateData::default())
        .await
}

pub async fn about(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    csrf: CsrfToken,
) -> Result<impl IntoResponse> {
    state
        .renderer()
        .render(&session, &csrf, "about.page.html", TemplateData::default())
        .await
}

pub async fn contact(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    csrf: CsrfToken,
) -> Result<impl IntoResponse> {
    state
        .renderer()
        .render(&session, &csrf, "contact.page.html", TemplateData::default())
        .await
}

/// Reservation form.
pub async fn make_reservation(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    csrf: CsrfToken,
) -> Result<impl IntoResponse> {
    let data = TemplateData::new().with_value("reservation", json!(Reservation::default()));
    state
        .renderer()
        .render(&session, &csrf, "make-reservation.page.html", data)
        .await
}

#[derive(Debug, Deserialize)]
pub struct ReservationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Reservation form submission: stash the reservation for the summary page.
pub async fn post_make_reservation(
    Extension(session): Extension<Session>,
    Form(form): Form<ReservationForm>,
) -> Result<impl IntoResponse> {
    let reservation = Reservation {
        first_name: form.first_name,
        last_name: form.last_name,
        email: form.email,
        phone: form.phone,
        ..Reservation::default()
    };

    session
        .insert(RESERVATION_SESSION_KEY, &reservation)
        .await
        .map_err(|e| Error::Session(format!("failed to store reservation: {e}")))?;
    Flash::push(&session, FlashKind::Flash, "Reservation received!").await?;

    Ok(Redirect::to("/reservation-summary"))
}

/// Summary of the reservation just made; reachable only right after a
/// submission.
pub async fn reservation_summary(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    csrf: CsrfToken,
) -> Result<Response> {
    let reservation: Option<Reservation> = session
        .remove(RESERVATION_SESSION_KEY)
        .await
        .map_err(|e| Error::Session(format!("failed to read reservation: {e}")))?;

    let Some(reservation) = reservation else {
        tracing::warn!("summary page hit without a reservation in the session");
        Flash::push(&session, FlashKind::Error, "Can't get reservation from session").await?;
        return Ok(Redirect::to("/").into_response());
    };

    let data = TemplateData::new().with_value("reservation", json!(reservation));
    let html = state
        .renderer()
        .render(&session, &csrf, "reservation-summary.page.html", data)
        .await?;
    Ok(html.into_response())
}

/// Availability search form.
pub async fn search_availability(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    csrf: CsrfToken,
) -> Result<impl IntoResponse> {
    state
        .renderer()
        .render(
            &session,
            &csrf,
            "search-availability.page.html",
            TemplateData::default(),
        )
        .await
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityForm {
    pub start_date: String,
    pub end_date: String,
}

/// Availability search submission.
pub async fn post_search_availability(
    Extension(session): Extension<Session>,
    Form(form): Form<AvailabilityForm>,
) -> Result<impl IntoResponse> {
    let start = NaiveDate::parse_from_str(&form.start_date, "%Y-%m-%d");
    let end = NaiveDate::parse_from_str(&form.end_date, "%Y-%m-%d");

    match (start, end) {
        (Ok(start), Ok(end)) if start <= end => {
            Flash::push(
                &session,
                FlashKind::Flash,
                format!("Availability request received for {start} to {end}."),
            )
            .await?;
        }
        _ => {
            Flash::push(&session, FlashKind::Error, "Please enter a valid date range.").await?;
        }
    }

    Ok(Redirect::to("/search-availability"))
}
