use std::time::Duration;

use anyhow::{Context, Result};
use navalha_core::api::{ApiError, ApiSession, public};
use navalha_core::models::{Barber, BookingConfirmation, BookingRequest, Service, Slot};

use crate::App;

/// Everything the booking wizard needs up front: the service catalog, the
/// barber list, and the API session that availability fetches and the final
/// submission run against.
#[derive(Debug, Clone)]
pub struct BookingCatalog {
    pub services: Vec<Service>,
    pub barbers: Vec<Barber>,
    pub api: ApiSession,
    pub timeout: Duration,
}

impl<'a> App<'a> {
    pub fn booking_prepare(&self) -> Result<BookingCatalog> {
        let config = self.ensure_config_ready()?;
        let api = ApiSession::new(config.api.base_url.trim());

        let services = public::fetch_services(self.transport, &api)
            .context("failed to load the service catalog")?;
        let barbers = public::fetch_barbers(self.transport, &api)
            .context("failed to load the barber list")?;

        Ok(BookingCatalog {
            services,
            barbers,
            api,
            timeout: config.api.timeout(),
        })
    }

    /// Passthrough to the availability endpoint; the server decides what is
    /// bookable, ordering included.
    pub fn booking_availability(
        &self,
        api: &ApiSession,
        barber_id: i64,
        date: &str,
    ) -> Result<Vec<Slot>, ApiError> {
        public::fetch_availability(self.transport, api, barber_id, date)
    }

    /// Kept as an `ApiError` result so the wizard can map rejection details
    /// and transport failures to its own messages.
    pub fn booking_submit(
        &self,
        api: &ApiSession,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, ApiError> {
        public::book_appointment(self.transport, api, request)
    }
}
