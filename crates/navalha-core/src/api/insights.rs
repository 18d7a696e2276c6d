use super::{ApiError, ApiSession, get};
use crate::models::{DashboardStats, QuickStats};
use crate::transport::HttpTransport;

pub const STATS_PERIODS: [&str; 4] = ["week", "month", "quarter", "year"];

pub fn dashboard_stats(
    transport: &dyn HttpTransport,
    session: &ApiSession,
) -> Result<DashboardStats, ApiError> {
    get(transport, session, "/dashboard/stats")
}

pub fn quick_stats(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    period: &str,
) -> Result<QuickStats, ApiError> {
    get(
        transport,
        session,
        &format!("/reports/quick-stats?period={period}"),
    )
}
