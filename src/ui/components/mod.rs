//! Reusable UI components.
//!
//! Small leptos components following a variant → CSS classes pattern, so
//! views never assemble class strings by hand.
//!
//! # Components
//!
//! - [`Button`]: Clickable button with variants and HTMX bindings
//! - [`Badge`]: Status badge/tag
//! - [`icons`]: SVG icon components

mod badge;
mod button;
pub mod icons;

pub use badge::{Badge, BadgeVariant};
pub use button::{Button, ButtonSize, ButtonVariant};
pub use icons::*;
