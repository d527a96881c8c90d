//! Integration tests for mergeviz
//!
//! These tests verify that the sorter, player, renderer, and app work together.

#[path = "../common/mod.rs"]
pub mod common;

pub mod app_flow;
pub mod playback_flow;
pub mod sort_properties;
