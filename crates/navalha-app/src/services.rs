use anyhow::{Context, Result, bail};
use navalha_core::api::services;
use navalha_core::models::{Service, ServiceDraft, ServiceUpdate, StaffUser};

use crate::App;

impl<'a> App<'a> {
    pub fn list_services(&self, active_only: bool) -> Result<Vec<Service>> {
        let session = self.authorized_session()?;
        services::list_services(self.transport, &session, active_only)
            .context("failed to load services")
    }

    pub fn add_service(&self, draft: ServiceDraft) -> Result<Service> {
        if draft.name.trim().is_empty() {
            bail!("service name must be non-empty");
        }
        if draft.price_centavos < 0 {
            bail!("service price must not be negative");
        }
        if draft.duration_minutes <= 0 {
            bail!("service duration must be at least one minute");
        }

        let session = self.authorized_session()?;
        services::create_service(self.transport, &session, &draft)
            .with_context(|| format!("failed to create service '{}'", draft.name))
    }

    pub fn update_service(&self, service_id: i64, update: ServiceUpdate) -> Result<Service> {
        if update == ServiceUpdate::default() {
            bail!("nothing to update; pass at least one field");
        }

        let session = self.authorized_session()?;
        services::update_service(self.transport, &session, service_id, &update)
            .with_context(|| format!("failed to update service {service_id}"))
    }

    pub fn list_staff(&self) -> Result<Vec<StaffUser>> {
        let session = self.authorized_session()?;
        services::list_staff(self.transport, &session).context("failed to load staff users")
    }

    pub fn list_staff_barbers(&self) -> Result<Vec<StaffUser>> {
        let session = self.authorized_session()?;
        services::list_barbers(self.transport, &session).context("failed to load barbers")
    }
}
