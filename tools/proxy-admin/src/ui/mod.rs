//! UI module - TUI rendering components.
//!
//! - `layout.rs`: Main layout orchestration
//! - `rules_panel.rs`: Rule list with per-row delete control
//! - `form_panel.rs`: Pattern / action / proxy inputs
//! - `config_panel.rs`: Active configuration text
//! - `widgets/`: Overlays (help, alert)

mod config_panel;
mod form_panel;
mod layout;
mod rules_panel;

pub mod widgets;

pub use layout::render;
