//! Unit tests for the connect bounded context.
