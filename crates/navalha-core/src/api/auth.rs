use super::{ApiError, ApiSession, get, post};
use crate::models::{LoginRequest, LoginToken, StaffUser};
use crate::transport::HttpTransport;

pub fn login(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    email: &str,
    password: &str,
) -> Result<LoginToken, ApiError> {
    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    post(transport, session, "/auth/login", &request)
}

pub fn current_user(
    transport: &dyn HttpTransport,
    session: &ApiSession,
) -> Result<StaffUser, ApiError> {
    get(transport, session, "/auth/me")
}
