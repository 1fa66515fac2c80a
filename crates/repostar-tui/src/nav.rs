// Bottom tab bar: which screen is showing

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Favorites,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Home, Tab::Favorites];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Favorites => "Favorites",
        }
    }

    /// Filled glyph when focused, outline otherwise
    pub fn icon(self, focused: bool) -> &'static str {
        match (self, focused) {
            (Tab::Home, true) => "⌂",
            (Tab::Home, false) => "△",
            (Tab::Favorites, true) => "♥",
            (Tab::Favorites, false) => "♡",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Favorites => 1,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Home => Tab::Favorites,
            Tab::Favorites => Tab::Home,
        }
    }

    /// Label as drawn in the tab bar
    pub fn label(self, active: Tab) -> String {
        format!("{} {}", self.icon(self == active), self.title())
    }
}
