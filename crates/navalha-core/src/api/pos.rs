use super::{ApiError, ApiSession, get, post};
use crate::models::{PaymentMethod, Sale, SaleDraft};
use crate::transport::HttpTransport;

pub fn payment_methods(
    transport: &dyn HttpTransport,
    session: &ApiSession,
) -> Result<Vec<PaymentMethod>, ApiError> {
    get(transport, session, "/pos/payment-methods")
}

pub fn create_sale(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    draft: &SaleDraft,
) -> Result<Sale, ApiError> {
    post(transport, session, "/pos/sale", draft)
}

pub fn list_sales(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<Vec<Sale>, ApiError> {
    let mut params = Vec::new();
    if let Some(start) = start_date {
        params.push(format!("start_date={start}"));
    }
    if let Some(end) = end_date {
        params.push(format!("end_date={end}"));
    }

    let path = if params.is_empty() {
        "/pos/sales".to_string()
    } else {
        format!("/pos/sales?{}", params.join("&"))
    };

    get(transport, session, &path)
}
