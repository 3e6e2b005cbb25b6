//! Terminal UI rendering layer.
//!
//! State is first reduced to a [`UIViewModel`] and then printed by small
//! components using ANSI escapes and cursor positioning.
//!
//! # Modules
//!
//! - [`viewmodel`]: Render-ready view model types and layout constants
//! - [`renderer`]: Top-level rendering entry point
//! - [`components`]: Header, search bar, filter bar, status, grid, overlays
//! - [`helpers`]: Cursor positioning, truncation, wrapping, highlighting
//! - [`theme`]: Color schemes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    CardItem, DetailView, EmptyState, FilterBarInfo, FooterInfo, GenrePickerView, HeaderInfo,
    SearchBarInfo, StatusInfo, StatusKind, UIViewModel,
};
