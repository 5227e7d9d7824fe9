//! Navigation drawer state.

/// Column threshold at which the drawer becomes permanent.
pub const DEFAULT_LG_BREAKPOINT: u16 = 120;
pub const EXPANDED_WIDTH: u16 = 24;
pub const COLLAPSED_WIDTH: u16 = 5;

/// Entries shown in the drawer as `(title, glyph)`.
pub const SIDEBAR_ITEMS: &[(&str, &str)] = &[("Dashboard", "◆"), ("Team", "☰"), ("Reports", "▤"), ("Settings", "⚙")];

/// Index into [`SIDEBAR_ITEMS`] of the screen this binary renders.
pub const ACTIVE_ITEM: usize = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrawerVariant {
    /// Always laid out; the toggle only changes its width.
    Permanent,
    /// Overlay shown only while open.
    Temporary,
}

pub fn variant_for_width(width: u16, lg_breakpoint: u16) -> DrawerVariant {
    if width >= lg_breakpoint { DrawerVariant::Permanent } else { DrawerVariant::Temporary }
}

#[derive(Clone, Debug, Default)]
pub struct SidebarState {
    pub open: bool,
}

impl SidebarState {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Columns the drawer takes out of the main layout.
    pub fn reserved_width(&self, variant: DrawerVariant) -> u16 {
        match (variant, self.open) {
            (DrawerVariant::Permanent, true) => EXPANDED_WIDTH,
            (DrawerVariant::Permanent, false) => COLLAPSED_WIDTH,
            (DrawerVariant::Temporary, _) => 0,
        }
    }
}
