//! Navigation-related state types.
//!
//! This module contains the views of the dashboard and the order they are
//! cycled through.

/// Specifying the different views.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum View {
    Projects,
    Materials,
    Items,
    Trends,
}

impl View {
    pub const ALL: [View; 4] = [View::Projects, View::Materials, View::Items, View::Trends];

    pub fn title(&self) -> &'static str {
        match self {
            View::Projects => "Projects",
            View::Materials => "Materials",
            View::Items => "Items",
            View::Trends => "Trends",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            View::Projects => 0,
            View::Materials => 1,
            View::Items => 2,
            View::Trends => 3,
        }
    }

    /// Following view, wrapping around.
    ///
    pub fn next(&self) -> View {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }

    /// Preceding view, wrapping around.
    ///
    pub fn previous(&self) -> View {
        View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()]
    }

    /// View bound to a digit key, `1` through `4`.
    ///
    pub fn from_digit(c: char) -> Option<View> {
        c.to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .and_then(|i| View::ALL.get(i).copied())
    }
}

/// Which trends list the cursor moves in.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TrendsPanel {
    Matches,
    Scraped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_cycle_wraps() {
        assert_eq!(View::Projects.next(), View::Materials);
        assert_eq!(View::Trends.next(), View::Projects);
        assert_eq!(View::Projects.previous(), View::Trends);
    }

    #[test]
    fn test_view_from_digit() {
        assert_eq!(View::from_digit('1'), Some(View::Projects));
        assert_eq!(View::from_digit('4'), Some(View::Trends));
        assert_eq!(View::from_digit('0'), None);
        assert_eq!(View::from_digit('5'), None);
        assert_eq!(View::from_digit('x'), None);
    }
}
