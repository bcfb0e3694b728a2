//! API layer: REST handlers, DTOs, and routing.

pub mod dto;
pub mod handlers;
pub mod routes;
