//! Shared test utilities for mergeviz
//!
//! This module provides common helpers for integration tests:
//! - A renderer that records every drawn frame
//! - TUI terminal testing helpers
