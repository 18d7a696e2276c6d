pub mod api;
pub mod config;
pub mod dates;
pub mod doctor;
pub mod models;
pub mod session;
#[cfg(test)]
pub(crate) mod test_support;
pub mod transport;
pub mod wizard;
