//! TUI type definitions for focus, content and actions.

use crate::navigation::InputEvent;
use crate::types::{Episode, Show};

/// Which kind of cards the main panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Shows,
    Episodes,
}

/// Focus state for the split-panel view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The show/episode selector on the left
    Selector,
    /// The card list
    Main,
}

/// Value carried by a selector entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorValue {
    Show(u32),
    Episode(String),
}

/// One entry in the selector panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOption {
    pub label: String,
    /// `None` for the leading placeholder entry
    pub value: Option<SelectorValue>,
}

impl SelectorOption {
    pub fn placeholder(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: None,
        }
    }
}

/// Actions that can be returned from the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action, continue running
    None,
    /// Quit the application
    Quit,
    /// Hand an input event to the navigator
    Dispatch(InputEvent),
}

/// Anything the card list can draw.
pub trait Listing {
    /// One-line label for the list row.
    fn heading(&self) -> String;

    /// Lines for the details pane.
    fn detail_lines(&self) -> Vec<String>;
}

impl Listing for Show {
    fn heading(&self) -> String {
        self.name.clone()
    }

    fn detail_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Genres: {}", self.genres_joined()),
            format!("Status: {}", self.status),
        ];
        if let Some(rating) = self.rating {
            lines.push(format!("Rating: {:.1}", rating));
        }
        if let Some(runtime) = self.runtime {
            lines.push(format!("Runtime: {} min", runtime));
        }
        lines.push(self.run_dates());
        if let Some(image) = &self.image {
            lines.push(format!("Image: {}", image.medium));
        }
        lines.push(String::new());
        lines.push(self.summary_text());
        lines
    }
}

impl Listing for Episode {
    fn heading(&self) -> String {
        self.title_line()
    }

    fn detail_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(image) = &self.image {
            lines.push(format!("Image: {}", image.medium));
            lines.push(String::new());
        }
        lines.push(self.summary_text());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_detail_lines_skip_missing_fields() {
        let show = Show::named(1, "Bare");
        let lines = show.detail_lines();
        assert!(lines.iter().all(|l| !l.starts_with("Rating")));
        assert!(lines.iter().all(|l| !l.starts_with("Image")));
        assert!(lines.contains(&"? | ?".to_string()));
    }

    #[test]
    fn test_episode_heading_is_title_line() {
        let ep = Episode::new(1, "Pilot", 1, 1);
        assert_eq!(ep.heading(), "Pilot - S01E01");
    }
}
