use anyhow::{Context, Result, bail};
use navalha_core::api::pos;
use navalha_core::models::{PaymentMethod, Sale, SaleDraft};

use crate::App;

impl<'a> App<'a> {
    pub fn payment_methods(&self) -> Result<Vec<PaymentMethod>> {
        let session = self.authorized_session()?;
        pos::payment_methods(self.transport, &session)
            .context("failed to load payment methods")
    }

    pub fn record_sale(&self, draft: SaleDraft) -> Result<Sale> {
        if draft.items.is_empty() {
            bail!("a sale needs at least one item");
        }
        if draft.items.iter().any(|item| item.quantity < 1) {
            bail!("sale item quantities must be at least 1");
        }
        if draft.discount_centavos < 0 {
            bail!("discount must not be negative");
        }

        let session = self.authorized_session()?;
        pos::create_sale(self.transport, &session, &draft).context("failed to record sale")
    }

    pub fn sales_between(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<Sale>> {
        let session = self.authorized_session()?;
        pos::list_sales(self.transport, &session, start_date, end_date)
            .context("failed to load sales")
    }
}
