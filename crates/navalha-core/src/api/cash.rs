use super::{ApiError, ApiSession, get, post, put};
use crate::models::{CashCloseDraft, CashOpenDraft, CashRegister, CashStatus};
use crate::transport::HttpTransport;

pub fn cash_status(
    transport: &dyn HttpTransport,
    session: &ApiSession,
) -> Result<CashStatus, ApiError> {
    get(transport, session, "/cash/status")
}

pub fn current_register(
    transport: &dyn HttpTransport,
    session: &ApiSession,
) -> Result<CashRegister, ApiError> {
    get(transport, session, "/cash/current")
}

pub fn open_register(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    draft: &CashOpenDraft,
) -> Result<CashRegister, ApiError> {
    post(transport, session, "/cash/open", draft)
}

pub fn close_register(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    register_id: i64,
    draft: &CashCloseDraft,
) -> Result<CashRegister, ApiError> {
    put(
        transport,
        session,
        &format!("/cash/{register_id}/close"),
        draft,
    )
}

pub fn register_history(
    transport: &dyn HttpTransport,
    session: &ApiSession,
) -> Result<Vec<CashRegister>, ApiError> {
    get(transport, session, "/cash/")
}
