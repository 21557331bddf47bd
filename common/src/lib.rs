//! Data model shared between the certificate verification service and its clients.

pub mod model;
pub mod requests;
