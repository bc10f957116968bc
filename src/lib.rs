//! Workspace-level integration tests for calcrs live under `tests/`.
