// handlers/protected/mod.rs - Protected handlers (bearer authentication required)
//
// Middleware: `jwt_auth_middleware` validates the token and injects `AuthUser`.
// A missing or invalid token is answered with 401 before any handler runs.

pub mod logs;

pub use logs::*;
