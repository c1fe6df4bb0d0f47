//! This crate exists to host the integration tests under `tests/`;
//! the shared scaffolding lives in `tests/fixtures/`.
