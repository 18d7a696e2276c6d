use anyhow::{Context, Result, bail};
use navalha_core::api::appointments::{self, AppointmentFilter};
use navalha_core::api::insights::{self, STATS_PERIODS};
use navalha_core::models::{Appointment, DashboardStats, QuickStats};

use crate::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardOverview {
    pub stats: DashboardStats,
    pub recent: Vec<Appointment>,
}

impl<'a> App<'a> {
    pub fn dashboard_overview(&self) -> Result<DashboardOverview> {
        let session = self.authorized_session()?;

        let stats = insights::dashboard_stats(self.transport, &session)
            .context("failed to load dashboard stats")?;

        let filter = AppointmentFilter {
            limit: Some(5),
            ..AppointmentFilter::default()
        };
        let recent = appointments::list_appointments(self.transport, &session, &filter)
            .context("failed to load recent appointments")?;

        Ok(DashboardOverview { stats, recent })
    }

    pub fn quick_stats(&self, period: &str) -> Result<QuickStats> {
        if !STATS_PERIODS.contains(&period) {
            bail!(
                "unknown period '{period}'; expected one of: {}",
                STATS_PERIODS.join(", ")
            );
        }

        let session = self.authorized_session()?;
        insights::quick_stats(self.transport, &session, period)
            .with_context(|| format!("failed to load quick stats for period '{period}'"))
    }
}
