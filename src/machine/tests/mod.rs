//! Unit tests for the machine inventory context.
