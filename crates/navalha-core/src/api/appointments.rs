use super::{ApiError, ApiSession, get, post, put};
use crate::models::{Appointment, AppointmentDraft, AppointmentUpdate};
use crate::transport::HttpTransport;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub date: Option<String>,
    pub barber_id: Option<i64>,
    pub limit: Option<u32>,
}

impl AppointmentFilter {
    fn query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(date) = &self.date {
            params.push(format!("date_filter={date}"));
        }
        if let Some(barber_id) = self.barber_id {
            params.push(format!("barbeiro_id={barber_id}"));
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={limit}"));
        }

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

pub fn list_appointments(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    filter: &AppointmentFilter,
) -> Result<Vec<Appointment>, ApiError> {
    get(
        transport,
        session,
        &format!("/appointments{}", filter.query_string()),
    )
}

pub fn create_appointment(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    draft: &AppointmentDraft,
) -> Result<Appointment, ApiError> {
    post(transport, session, "/appointments", draft)
}

pub fn update_appointment(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    appointment_id: i64,
    update: &AppointmentUpdate,
) -> Result<Appointment, ApiError> {
    put(
        transport,
        session,
        &format!("/appointments/{appointment_id}"),
        update,
    )
}
