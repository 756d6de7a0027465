//! Mobile sidebar navigation.

/// Widest viewport, in CSS pixels, that uses the collapsible sidebar.
pub const MOBILE_BREAKPOINT: u32 = 768;

/// Class set on the sidebar while it is open on a narrow viewport.
pub const MOBILE_OPEN_CLASS: &str = "mobile-open";

/// Where a click landed, relative to the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Inside the sidebar.
    Sidebar,
    /// On the navigation button.
    NavButton,
    /// Anywhere else on the page.
    Outside,
}

/// Open/closed state of the sidebar on narrow viewports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileSidebar {
    width: u32,
    open: bool,
}

impl MobileSidebar {
    /// Closed sidebar on a viewport `width` pixels wide.
    pub fn new(width: u32) -> Self {
        Self { width, open: false }
    }

    /// Whether the viewport is at or below the breakpoint.
    pub fn is_mobile(&self) -> bool {
        self.width <= MOBILE_BREAKPOINT
    }

    /// Whether the sidebar carries the `mobile-open` class.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current viewport width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The navigation button was pressed.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Remove the `mobile-open` class.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// A click anywhere on the page. The navigation button toggles; on a
    /// mobile viewport a click outside the sidebar closes it.
    pub fn click(&mut self, target: ClickTarget) {
        match target {
            ClickTarget::NavButton => self.toggle(),
            ClickTarget::Outside if self.is_mobile() => self.close(),
            ClickTarget::Outside | ClickTarget::Sidebar => {}
        }
    }

    /// The viewport was resized. Growing past the breakpoint closes it.
    pub fn resize(&mut self, width: u32) {
        self.width = width;
        if !self.is_mobile() {
            self.close();
        }
    }

    /// Class list of the sidebar element.
    pub fn class_name(&self) -> String {
        if self.open {
            format!("sidebar {MOBILE_OPEN_CLASS}")
        } else {
            "sidebar".to_string()
        }
    }
}
