//! Viewport width tracking and breakpoint classification.
//!
//! The observer remembers the last measured window width so the grid only
//! recomputes column styles when the width actually changes.

/// Widths below this are mobile.
pub const MOBILE_MAX_EXCLUSIVE: f32 = 640.0;
/// Widths at or above this are desktop.
pub const DESKTOP_MIN: f32 = 1024.0;
/// Width assumed when no measurement is available.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1024.0;

/// Responsive breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    pub fn classify(width_px: f32) -> Self {
        if width_px < MOBILE_MAX_EXCLUSIVE {
            Breakpoint::Mobile
        } else if width_px < DESKTOP_MIN {
            Breakpoint::Tablet
        } else {
            Breakpoint::Desktop
        }
    }
}

/// Derived viewport description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportClass {
    pub width_px: f32,
    pub breakpoint: Breakpoint,
}

impl ViewportClass {
    pub fn new(width_px: f32) -> Self {
        Self { width_px, breakpoint: Breakpoint::classify(width_px) }
    }

    pub fn is_mobile(&self) -> bool {
        self.breakpoint == Breakpoint::Mobile
    }

    pub fn is_tablet(&self) -> bool {
        self.breakpoint == Breakpoint::Tablet
    }

    pub fn is_desktop(&self) -> bool {
        self.breakpoint == Breakpoint::Desktop
    }
}

/// Tracks viewport width changes.
///
/// Responsibilities:
/// - Remembering the last observed width
/// - Falling back to a fixed width when measurement is unavailable
/// - Reporting whether a new observation requires a layout recompute
#[derive(Debug, Clone)]
pub struct ViewportObserver {
    fallback_width: f32,
    current: Option<ViewportClass>,
}

impl Default for ViewportObserver {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH)
    }
}

impl ViewportObserver {
    /// Creates an observer that has not seen a measurement yet.
    pub fn new(fallback_width: f32) -> Self {
        Self { fallback_width, current: None }
    }

    /// Records a measurement.
    ///
    /// `None` or a non-finite / non-positive width counts as unavailable and
    /// uses the fallback width.
    ///
    /// # Returns
    /// `true` if the width differs from the previous observation (or this is
    /// the first one), meaning column styles must be recomputed.
    pub fn observe(&mut self, measured: Option<f32>) -> bool {
        let width = measured
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(self.fallback_width);

        match self.current {
            Some(current) if current.width_px == width => false,
            _ => {
                self.current = Some(ViewportClass::new(width));
                true
            }
        }
    }

    /// Returns the current viewport, falling back when nothing was observed.
    pub fn viewport(&self) -> ViewportClass {
        self.current.unwrap_or_else(|| ViewportClass::new(self.fallback_width))
    }

    pub fn width(&self) -> f32 {
        self.viewport().width_px
    }

    /// Forgets the last observation so the next one always reports a change.
    pub fn invalidate(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_breakpoints_at_boundaries() {
        assert_eq!(Breakpoint::classify(639.9), Breakpoint::Mobile);
        assert_eq!(Breakpoint::classify(640.0), Breakpoint::Tablet);
        assert_eq!(Breakpoint::classify(1023.0), Breakpoint::Tablet);
        assert_eq!(Breakpoint::classify(1024.0), Breakpoint::Desktop);
    }

    #[test]
    fn reports_only_real_changes() {
        let mut observer = ViewportObserver::default();
        assert!(observer.observe(Some(800.0)));
        assert!(!observer.observe(Some(800.0)));
        assert!(observer.observe(Some(500.0)));
        assert!(observer.viewport().is_mobile());
    }

    #[test]
    fn unavailable_measurement_falls_back_to_desktop() {
        let mut observer = ViewportObserver::default();
        assert!(observer.observe(None));
        assert_eq!(observer.width(), DEFAULT_VIEWPORT_WIDTH);
        assert!(observer.viewport().is_desktop());
        assert!(!observer.observe(Some(f32::NAN)));
    }

    #[test]
    fn invalidate_forces_recompute() {
        let mut observer = ViewportObserver::default();
        observer.observe(Some(700.0));
        observer.invalidate();
        assert!(observer.observe(Some(700.0)));
    }
}
