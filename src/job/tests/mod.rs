//! Unit tests for the job reporting context.
