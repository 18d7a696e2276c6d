use anyhow::{Context, Result, bail};
use navalha_core::api::clients;
use navalha_core::models::{ClientDraft, ClientRecord, ClientUpdate};

use crate::App;

impl<'a> App<'a> {
    pub fn list_clients(&self) -> Result<Vec<ClientRecord>> {
        let session = self.authorized_session()?;
        clients::list_clients(self.transport, &session).context("failed to load clients")
    }

    pub fn add_client(&self, draft: ClientDraft) -> Result<ClientRecord> {
        if draft.name.trim().is_empty() {
            bail!("client name must be non-empty");
        }
        if draft.phone.trim().is_empty() {
            bail!("client phone must be non-empty");
        }

        let session = self.authorized_session()?;
        clients::create_client(self.transport, &session, &draft)
            .with_context(|| format!("failed to create client '{}'", draft.name))
    }

    pub fn update_client(&self, client_id: i64, update: ClientUpdate) -> Result<ClientRecord> {
        if update == ClientUpdate::default() {
            bail!("nothing to update; pass at least one field");
        }

        let session = self.authorized_session()?;
        clients::update_client(self.transport, &session, client_id, &update)
            .with_context(|| format!("failed to update client {client_id}"))
    }

    pub fn deactivate_client(&self, client_id: i64) -> Result<()> {
        let session = self.authorized_session()?;
        clients::deactivate_client(self.transport, &session, client_id)
            .with_context(|| format!("failed to deactivate client {client_id}"))?;
        Ok(())
    }
}
