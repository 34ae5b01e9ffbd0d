//! Rendering helpers shared by the grid's ui components:
//! - Cell rendering (action, custom and plain cells)
//! - Text utilities (text measurement and truncation)

pub mod cell_renderer;
pub mod text_utils;
