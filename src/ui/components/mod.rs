//! Small reusable building blocks for the server-rendered views.
//!
//! - [`Button`]: submit/plain button with variants
//! - [`Card`], [`CardHeader`], [`CardContent`]: result section container
//! - [`Badge`]: verdict and status pills
//! - [`icons`]: inline SVG icons

mod badge;
mod button;
mod card;
mod icons;

pub use badge::{Badge, BadgeVariant};
pub use button::{Button, ButtonSize, ButtonVariant};
pub use card::{Card, CardContent, CardHeader};
pub use icons::*;
