use anyhow::{Context, Result, bail};
use navalha_core::api::cash;
use navalha_core::models::{CashCloseDraft, CashOpenDraft, CashRegister, CashStatus};

use crate::App;

impl<'a> App<'a> {
    pub fn cash_status(&self) -> Result<CashStatus> {
        let session = self.authorized_session()?;
        cash::cash_status(self.transport, &session).context("failed to check cash status")
    }

    pub fn current_cash_register(&self) -> Result<CashRegister> {
        let session = self.authorized_session()?;
        cash::current_register(self.transport, &session)
            .context("failed to load the open cash register")
    }

    pub fn open_cash_register(
        &self,
        opening_centavos: i64,
        notes: Option<String>,
    ) -> Result<CashRegister> {
        if opening_centavos < 0 {
            bail!("opening amount must not be negative");
        }

        let session = self.authorized_session()?;
        let draft = CashOpenDraft {
            opening_centavos,
            notes,
        };
        cash::open_register(self.transport, &session, &draft)
            .context("failed to open cash register")
    }

    /// Closes whatever register is currently open for the operator; the
    /// backend identifies registers by id, so the open one is looked up first.
    pub fn close_cash_register(
        &self,
        closing_centavos: i64,
        notes: Option<String>,
    ) -> Result<CashRegister> {
        if closing_centavos < 0 {
            bail!("closing amount must not be negative");
        }

        let session = self.authorized_session()?;
        let current = cash::current_register(self.transport, &session)
            .context("no open cash register to close")?;

        let draft = CashCloseDraft {
            closing_centavos,
            notes,
        };
        cash::close_register(self.transport, &session, current.id, &draft)
            .with_context(|| format!("failed to close cash register {}", current.id))
    }

    pub fn cash_history(&self) -> Result<Vec<CashRegister>> {
        let session = self.authorized_session()?;
        cash::register_history(self.transport, &session)
            .context("failed to load cash register history")
    }
}
