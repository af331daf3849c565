//! Flipbook Cache Library
//!
//! Page materialization bookkeeping for the flipbook viewer: which page
//! slots have been requested for rendering, and the prefetch policy that
//! grows that set as the reader navigates.

pub mod config;
pub mod pages;

pub use config::PrefetchConfig;
pub use pages::{NavigationKind, PageSet, SlotIndex};
