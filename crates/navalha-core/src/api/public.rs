use super::{ApiError, ApiSession, get, post};
use crate::models::{Barber, BookingConfirmation, BookingRequest, Service, Slot};
use crate::transport::HttpTransport;

pub fn fetch_services(
    transport: &dyn HttpTransport,
    session: &ApiSession,
) -> Result<Vec<Service>, ApiError> {
    get(transport, session, "/public/services")
}

pub fn fetch_barbers(
    transport: &dyn HttpTransport,
    session: &ApiSession,
) -> Result<Vec<Barber>, ApiError> {
    get(transport, session, "/public/barbers")
}

pub fn fetch_availability(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    barber_id: i64,
    date: &str,
) -> Result<Vec<Slot>, ApiError> {
    get(
        transport,
        session,
        &format!("/public/availability/{barber_id}?date_str={date}"),
    )
}

pub fn book_appointment(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    request: &BookingRequest,
) -> Result<BookingConfirmation, ApiError> {
    post(transport, session, "/public/book-appointment", request)
}
