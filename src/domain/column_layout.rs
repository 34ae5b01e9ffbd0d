//! Responsive column sizing.
//!
//! `compute_styles` produces a CSS-like style per visible column (width,
//! min/max width, flex shorthand). `resolve_widths` turns those styles into
//! concrete pixel widths for a given available width, which is what the
//! egui renderer lays cells out with.

use std::fmt;

use crate::columns::{ColumnSizing, ColumnSpec};
use crate::state::{Breakpoint, ViewportClass};

/// Minimum width used when a column declares none.
pub const DEFAULT_MIN_WIDTH: f32 = 50.0;

/// Horizontal padding a header needs beyond its text.
const HEADER_PADDING: f32 = 32.0;
const WIDE_CHAR_WIDTH: f32 = 10.0;
const NORMAL_CHAR_WIDTH: f32 = 7.0;

/// Mobile columns never get narrower than this.
const MOBILE_FLOOR: f32 = 35.0;
/// Tablet columns never get narrower than this.
const TABLET_FLOOR: f32 = 40.0;
const TABLET_SHRINK: f32 = 0.8;
/// Page gutter subtracted from the mobile viewport before splitting it.
const MOBILE_GUTTER: f32 = 32.0;

/// Flex basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlexBasis {
    Auto,
    Zero,
}

/// Flex shorthand: grow, shrink, basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flex {
    pub grow: f32,
    pub shrink: f32,
    pub basis: FlexBasis,
}

impl Flex {
    /// `0 0 auto`: sized by width or content, never stretches.
    pub const NONE: Flex = Flex { grow: 0.0, shrink: 0.0, basis: FlexBasis::Auto };
    /// `1 1 0`: fills leftover space.
    pub const FILL: Flex = Flex { grow: 1.0, shrink: 1.0, basis: FlexBasis::Zero };

    /// `<weight> 1 0`.
    pub fn weighted(weight: f32) -> Self {
        Flex { grow: weight, shrink: 1.0, basis: FlexBasis::Zero }
    }

    pub fn is_flexible(&self) -> bool {
        self.grow > 0.0
    }
}

impl fmt::Display for Flex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let basis = match self.basis {
            FlexBasis::Auto => "auto",
            FlexBasis::Zero => "0",
        };
        write!(f, "{} {} {}", self.grow, self.shrink, basis)
    }
}

/// Computed style for one visible column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStyle {
    pub width: Option<f32>,
    pub min_width: f32,
    pub max_width: Option<f32>,
    pub flex: Flex,
}

/// Estimated pixel width a header label needs to stay unclipped.
///
/// `W`, `M`, `w` and `m` count as wide characters.
pub fn header_text_width(text: &str) -> f32 {
    let (wide, normal) = text.chars().fold((0u32, 0u32), |(wide, normal), c| {
        if matches!(c, 'W' | 'M' | 'w' | 'm') {
            (wide + 1, normal)
        } else {
            (wide, normal + 1)
        }
    });
    wide as f32 * WIDE_CHAR_WIDTH + normal as f32 * NORMAL_CHAR_WIDTH + HEADER_PADDING
}

/// Minimum width for a column at the given viewport.
///
/// The header text floor always wins over the breakpoint shrink.
pub fn min_width_for<R>(column: &ColumnSpec<R>, viewport: ViewportClass, visible_count: usize) -> f32 {
    let header = header_text_width(&column.header_name);
    let base = column.min_width.unwrap_or(DEFAULT_MIN_WIDTH);

    let responsive = match viewport.breakpoint {
        Breakpoint::Mobile => {
            let count = visible_count.max(1) as f32;
            MOBILE_FLOOR.max(((viewport.width_px - MOBILE_GUTTER) / count).floor())
        }
        Breakpoint::Tablet => TABLET_FLOOR.max(base * TABLET_SHRINK),
        Breakpoint::Desktop => base,
    };

    header.max(responsive)
}

/// Computes one style per visible column, in visible order.
pub fn compute_styles<R>(columns: &[ColumnSpec<R>], viewport_width: f32) -> Vec<ColumnStyle> {
    let viewport = ViewportClass::new(viewport_width);
    let visible: Vec<&ColumnSpec<R>> = columns.iter().filter(|c| !c.hidden).collect();
    let any_flex = visible.iter().any(|c| c.flex_weight.is_some());
    let last = visible.len().saturating_sub(1);

    visible
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let (width, flex) = match column.sizing() {
                ColumnSizing::Fixed(width) => (Some(width), Flex::NONE),
                ColumnSizing::FlexWeighted(weight) => (None, Flex::weighted(weight)),
                ColumnSizing::AutoSized if any_flex || index == last => (None, Flex::FILL),
                ColumnSizing::AutoSized => (None, Flex::NONE),
            };

            ColumnStyle {
                width,
                min_width: min_width_for(column, viewport, visible.len()),
                max_width: column.max_width,
                flex,
            }
        })
        .collect()
}

fn clamp_to(style: &ColumnStyle, width: f32) -> f32 {
    let width = width.max(style.min_width);
    match style.max_width {
        Some(max) => width.min(max.max(style.min_width)),
        None => width,
    }
}

/// Resolves styles into pixel widths for `available` horizontal space.
///
/// Non-flexible columns take their width (or min width when auto-sized).
/// Leftover space is shared between flexible columns by grow factor; a
/// column that hits its min or max is frozen there and the remainder is
/// shared again. Columns never shrink below their min width, so the total
/// may exceed `available`.
pub fn resolve_widths(styles: &[ColumnStyle], available: f32) -> Vec<f32> {
    let mut widths: Vec<f32> = styles
        .iter()
        .map(|style| clamp_to(style, style.width.unwrap_or(style.min_width)))
        .collect();

    let mut open: Vec<usize> = (0..styles.len()).filter(|&i| styles[i].flex.is_flexible()).collect();

    while !open.is_empty() {
        let taken: f32 = (0..styles.len())
            .filter(|i| !open.contains(i))
            .map(|i| widths[i])
            .sum();
        let free = (available - taken).max(0.0);
        let total_grow: f32 = open.iter().map(|&i| styles[i].flex.grow).sum();

        let mut frozen = Vec::new();
        for &i in &open {
            let share = free * styles[i].flex.grow / total_grow;
            let clamped = clamp_to(&styles[i], share);
            widths[i] = clamped;
            if clamped != share {
                frozen.push(i);
            }
        }

        if frozen.is_empty() {
            break;
        }
        open.retain(|i| !frozen.contains(i));
    }

    widths
}
