//! HTTP layer: `GET /` and `POST /api/chat`.

pub mod error;
pub mod handlers;
pub mod router;
