//! UI module - contains UI rendering components
//!
//! Widgets here know nothing about the controller; views in `app` wire them up.

pub mod components;
