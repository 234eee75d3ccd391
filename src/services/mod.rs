//! External service clients.

pub mod wikipedia;
