//! Recloser configurator — schema-driven rendering of firmware settings.
//!
//! The backend describes each firmware's settings as a tree of services and
//! features. This crate turns that tree into something a technician can
//! read: labels in the preferred language, one control per feature, nested
//! sections indented under their parents.
//!
//! - [`i18n`]: translation resolution
//! - [`control`]: feature metadata to control descriptions
//! - [`render`]: service tree to nested blocks
//! - [`controller`]: which service is selected and what layout is loaded
//! - [`source`]: where inventory and layouts come from
//! - [`tui`]: the interactive terminal front end

pub mod config;
pub mod control;
pub mod controller;
pub mod i18n;
pub mod model;
pub mod outline;
pub mod render;
pub mod source;
pub mod tui;
