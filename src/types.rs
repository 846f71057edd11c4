//! Type definitions for the show-browser application.
//!
//! This module contains the validated domain types for shows and episodes.
//! Raw API payloads are decoded in [`crate::api`] and converted into these.

/// A poster or still image reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    /// URL of the medium-sized image.
    pub medium: String,
}

/// A show from the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Show {
    /// Unique identifier for the show.
    pub id: u32,

    /// Display name of the show.
    pub name: String,

    /// Summary as an HTML fragment (empty when the catalog has none).
    pub summary: String,

    /// Genres in catalog order.
    pub genres: Vec<String>,

    /// Optional poster image.
    pub image: Option<Image>,

    /// Running status, e.g. "Running" or "Ended".
    pub status: String,

    /// Average rating, when the catalog has one.
    pub rating: Option<f64>,

    /// Typical episode runtime in minutes.
    pub runtime: Option<u32>,

    /// Premiere date as reported by the catalog.
    pub premiered: Option<String>,

    /// End date as reported by the catalog.
    pub ended: Option<String>,
}

impl Show {
    /// Genres joined into a single searchable string.
    ///
    /// # Examples
    ///
    /// ```
    /// use show_browser::types::Show;
    ///
    /// let mut show = Show::named(1, "Under the Dome");
    /// show.genres = vec!["Drama".to_string(), "Thriller".to_string()];
    /// assert_eq!(show.genres_joined(), "Drama, Thriller");
    /// ```
    pub fn genres_joined(&self) -> String {
        self.genres.join(", ")
    }

    /// Summary with HTML markup stripped.
    pub fn summary_text(&self) -> String {
        html_to_text(&self.summary)
    }

    /// The "premiered | ended" line shown on show cards.
    pub fn run_dates(&self) -> String {
        format!(
            "{} | {}",
            self.premiered.as_deref().unwrap_or("?"),
            self.ended.as_deref().unwrap_or("?")
        )
    }

    /// A show with only an id and name set.
    pub fn named(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            summary: String::new(),
            genres: Vec::new(),
            image: None,
            status: "Unknown".to_string(),
            rating: None,
            runtime: None,
            premiered: None,
            ended: None,
        }
    }
}

/// An episode of a show.
#[derive(Clone, Debug, PartialEq)]
pub struct Episode {
    /// Unique identifier for the episode.
    pub id: u32,

    /// Episode title.
    pub name: String,

    /// Season number, at least 1.
    pub season: u32,

    /// Episode number within the season, at least 1.
    pub number: u32,

    /// Summary as an HTML fragment (empty when the catalog has none).
    pub summary: String,

    /// Optional still image.
    pub image: Option<Image>,
}

impl Episode {
    /// Season/episode code, zero-padded to two digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use show_browser::types::Episode;
    ///
    /// let ep = Episode::new(1, "Pilot", 1, 1);
    /// assert_eq!(ep.code(), "S01E01");
    ///
    /// let late = Episode::new(2, "Finale", 12, 104);
    /// assert_eq!(late.code(), "S12E104");
    /// ```
    pub fn code(&self) -> String {
        format!("S{:02}E{:02}", self.season, self.number)
    }

    /// Label used for episode dropdown entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use show_browser::types::Episode;
    ///
    /// let ep = Episode::new(4169, "Winter Is Coming", 1, 1);
    /// assert_eq!(ep.option_label(), "S01E01 - Winter Is Coming");
    /// ```
    pub fn option_label(&self) -> String {
        format!("{} - {}", self.code(), self.name)
    }

    /// Title line used on episode cards.
    pub fn title_line(&self) -> String {
        format!("{} - {}", self.name, self.code())
    }

    /// Summary with HTML markup stripped.
    pub fn summary_text(&self) -> String {
        html_to_text(&self.summary)
    }

    /// An episode with no summary or image.
    pub fn new(id: u32, name: &str, season: u32, number: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            season,
            number,
            summary: String::new(),
            image: None,
        }
    }
}

fn html_to_text(html: &str) -> String {
    nanohtml2text::html2text(html).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_code_pads_single_digits() {
        let ep = Episode::new(1, "Pilot", 2, 9);
        assert_eq!(ep.code(), "S02E09");
    }

    #[test]
    fn test_episode_title_line() {
        let ep = Episode::new(1, "Pilot", 1, 1);
        assert_eq!(ep.title_line(), "Pilot - S01E01");
    }

    #[test]
    fn test_episode_summary_text_strips_markup() {
        let mut ep = Episode::new(1, "Pilot", 1, 1);
        ep.summary = "<p>The <b>town</b> is sealed.</p>".to_string();
        assert_eq!(ep.summary_text(), "The town is sealed.");
    }

    #[test]
    fn test_show_genres_joined_empty() {
        let show = Show::named(1, "Untitled");
        assert_eq!(show.genres_joined(), "");
    }

    #[test]
    fn test_show_run_dates_with_missing_end() {
        let mut show = Show::named(1, "Running Show");
        show.premiered = Some("2013-06-24".to_string());
        assert_eq!(show.run_dates(), "2013-06-24 | ?");
    }
}
