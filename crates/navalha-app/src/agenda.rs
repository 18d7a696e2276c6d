use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use navalha_core::api::appointments::{self, AppointmentFilter};
use navalha_core::api::{clients, services};
use navalha_core::models::{
    APPOINTMENT_STATUSES, Appointment, AppointmentDraft, AppointmentUpdate,
};

use crate::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaRow {
    pub id: i64,
    pub date_time: String,
    pub client: String,
    pub barber: String,
    pub service: String,
    pub status: String,
    pub notes: Option<String>,
}

impl<'a> App<'a> {
    /// The appointments endpoint returns bare ids; names are resolved
    /// client-side against the client, barber, and service registries.
    pub fn agenda(&self, date: Option<&str>, barber_id: Option<i64>) -> Result<Vec<AgendaRow>> {
        let session = self.authorized_session()?;

        let filter = AppointmentFilter {
            date: date.map(str::to_string),
            barber_id,
            limit: None,
        };
        let appointments = appointments::list_appointments(self.transport, &session, &filter)
            .context("failed to load appointments")?;
        let client_names: HashMap<i64, String> = clients::list_clients(self.transport, &session)
            .context("failed to load clients for name resolution")?
            .into_iter()
            .map(|client| (client.id, client.name))
            .collect();
        let barber_names: HashMap<i64, String> = services::list_barbers(self.transport, &session)
            .context("failed to load barbers for name resolution")?
            .into_iter()
            .map(|barber| (barber.id, barber.name))
            .collect();
        let service_names: HashMap<i64, String> =
            services::list_services(self.transport, &session, false)
                .context("failed to load services for name resolution")?
                .into_iter()
                .map(|service| (service.id, service.name))
                .collect();

        let resolve = |names: &HashMap<i64, String>, id: i64| {
            names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| format!("#{id}"))
        };

        let mut rows: Vec<AgendaRow> = appointments
            .into_iter()
            .map(|appointment| AgendaRow {
                id: appointment.id,
                date_time: appointment.date_time.clone(),
                client: resolve(&client_names, appointment.client_id),
                barber: resolve(&barber_names, appointment.barber_id),
                service: resolve(&service_names, appointment.service_id),
                status: appointment.status,
                notes: appointment.notes,
            })
            .collect();

        rows.sort_by(|left, right| left.date_time.cmp(&right.date_time));
        Ok(rows)
    }

    pub fn book_for_client(&self, draft: AppointmentDraft) -> Result<Appointment> {
        let session = self.authorized_session()?;
        appointments::create_appointment(self.transport, &session, &draft)
            .context("failed to create appointment")
    }

    pub fn set_appointment_status(&self, appointment_id: i64, status: &str) -> Result<Appointment> {
        if !APPOINTMENT_STATUSES.contains(&status) {
            bail!(
                "unknown appointment status '{status}'; expected one of: {}",
                APPOINTMENT_STATUSES.join(", ")
            );
        }

        let session = self.authorized_session()?;
        let update = AppointmentUpdate {
            status: Some(status.to_string()),
            ..AppointmentUpdate::default()
        };
        appointments::update_appointment(self.transport, &session, appointment_id, &update)
            .with_context(|| format!("failed to update appointment {appointment_id}"))
    }
}
