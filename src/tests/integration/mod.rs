//! End-to-end tests against an in-memory SQLite database.
