//! Query filtering and display ordering for shows and episodes.

use crate::types::{Episode, Show};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A textual attribute that a query can match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Summary,
    Genres,
}

/// Something the filter engine can search.
pub trait Searchable {
    /// Fields searched when the caller has no preference.
    const DEFAULT_FIELDS: &'static [Field];

    /// Noun used in match reports ("show", "episode").
    const NOUN: &'static str;

    /// Text of `field`, or `None` if this item has no such field.
    fn field_text(&self, field: Field) -> Option<Cow<'_, str>>;
}

impl Searchable for Show {
    const DEFAULT_FIELDS: &'static [Field] = &[Field::Name, Field::Summary, Field::Genres];
    const NOUN: &'static str = "show";

    fn field_text(&self, field: Field) -> Option<Cow<'_, str>> {
        match field {
            Field::Name => Some(Cow::Borrowed(&self.name)),
            Field::Summary => Some(Cow::Borrowed(&self.summary)),
            Field::Genres => Some(Cow::Owned(self.genres_joined())),
        }
    }
}

impl Searchable for Episode {
    const DEFAULT_FIELDS: &'static [Field] = &[Field::Name, Field::Summary];
    const NOUN: &'static str = "episode";

    fn field_text(&self, field: Field) -> Option<Cow<'_, str>> {
        match field {
            Field::Name => Some(Cow::Borrowed(&self.name)),
            Field::Summary => Some(Cow::Borrowed(&self.summary)),
            Field::Genres => None,
        }
    }
}

/// What to display when a non-empty query matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyResults {
    /// Render an empty list alongside the "No results" status
    #[default]
    ShowEmpty,
    /// Fall back to the unfiltered collection
    ShowAll,
}

/// Normalize a raw query: trimmed and lowercased. Empty means "no filter".
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Return the items whose configured fields contain `query`, case-insensitively.
///
/// A blank query returns every item. Relative order is always preserved.
pub fn filter<'a, T: Searchable>(items: &'a [T], query: &str, fields: &[Field]) -> Vec<&'a T> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| {
            fields.iter().any(|field| {
                item.field_text(*field)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
        })
        .collect()
}

/// Stable, case-insensitive sort by show name.
pub fn sort_by_name(shows: &mut [Show]) {
    shows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}

/// Status line reporting how many items matched.
///
/// # Examples
///
/// ```
/// use show_browser::filter::search_status;
///
/// assert_eq!(search_status("dome", 2, "show"), "\"dome\" found in 2 show(s)");
/// assert_eq!(search_status("zzz", 0, "episode"), "No results found for \"zzz\"");
/// ```
pub fn search_status(query: &str, count: usize, noun: &str) -> String {
    if count > 0 {
        format!("\"{}\" found in {} {}(s)", query, count, noun)
    } else {
        format!("No results found for \"{}\"", query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(id: u32, name: &str, summary: &str, genres: &[&str]) -> Show {
        let mut show = Show::named(id, name);
        show.summary = summary.to_string();
        show.genres = genres.iter().map(|g| g.to_string()).collect();
        show
    }

    fn sample_shows() -> Vec<Show> {
        vec![
            show(1, "Breaking Bad", "<p>A chemistry teacher turns to crime.</p>", &["Drama", "Crime"]),
            show(2, "The Office", "<p>A mockumentary about office life.</p>", &["Comedy"]),
            show(3, "Crime Scene", "<p>Investigators at work.</p>", &["Documentary"]),
            show(4, "Planet Earth", "<p>Nature, filmed.</p>", &["Nature"]),
        ]
    }

    #[test]
    fn test_filter_matches_name_case_insensitively() {
        let shows = sample_shows();
        let result = filter(&shows, "OFFICE", Show::DEFAULT_FIELDS);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 2);
    }

    #[test]
    fn test_filter_matches_genres_and_summary() {
        let shows = sample_shows();
        let ids: Vec<u32> = filter(&shows, "crime", Show::DEFAULT_FIELDS)
            .iter()
            .map(|s| s.id)
            .collect();
        // 1 via summary and genre, 3 via name
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_filter_respects_configured_fields() {
        let shows = sample_shows();
        let ids: Vec<u32> = filter(&shows, "crime", &[Field::Name])
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_filter_blank_query_is_identity() {
        let shows = sample_shows();
        for query in ["", "   ", "\t\n"] {
            let result = filter(&shows, query, Show::DEFAULT_FIELDS);
            assert_eq!(result.len(), shows.len());
            assert!(result.iter().zip(shows.iter()).all(|(a, b)| std::ptr::eq(*a, b)));
        }
    }

    #[test]
    fn test_filter_trims_query() {
        let shows = sample_shows();
        assert_eq!(filter(&shows, "  planet  ", Show::DEFAULT_FIELDS).len(), 1);
    }

    #[test]
    fn test_filter_results_are_matching_subsequence() {
        let shows = sample_shows();
        for query in ["a", "e", "o", "the", "xyz", "<p>"] {
            let result = filter(&shows, query, Show::DEFAULT_FIELDS);

            // every result matches
            for item in &result {
                let hit = Show::DEFAULT_FIELDS.iter().any(|f| {
                    item.field_text(*f)
                        .unwrap()
                        .to_lowercase()
                        .contains(&query.to_lowercase())
                });
                assert!(hit, "{} should match {:?}", item.name, query);
            }

            // and appears in input order
            let positions: Vec<usize> = result
                .iter()
                .map(|r| shows.iter().position(|s| std::ptr::eq(s, *r)).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_filter_episodes_ignore_genres() {
        let mut ep = Episode::new(1, "Pilot", 1, 1);
        ep.summary = "<p>Drama unfolds.</p>".to_string();
        let episodes = vec![ep, Episode::new(2, "Second", 1, 2)];

        assert_eq!(filter(&episodes, "drama", Episode::DEFAULT_FIELDS).len(), 1);
        assert!(filter(&episodes, "drama", &[Field::Genres]).is_empty());
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let mut shows = vec![
            Show::named(1, "banana"),
            Show::named(2, "Apple"),
            Show::named(3, "apple2"),
        ];
        sort_by_name(&mut shows);
        let names: Vec<&str> = shows.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "apple2", "banana"]);
    }

    #[test]
    fn test_sort_by_name_is_stable_and_idempotent() {
        let mut shows = vec![
            Show::named(1, "Lost"),
            Show::named(2, "alf"),
            Show::named(3, "LOST"),
            Show::named(4, "lost"),
        ];
        sort_by_name(&mut shows);
        let ids: Vec<u32> = shows.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 1, 3, 4]);

        let before = shows.clone();
        sort_by_name(&mut shows);
        assert_eq!(shows, before);
    }

    #[test]
    fn test_empty_results_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: EmptyResults,
        }
        let w: Wrapper = toml::from_str("policy = \"show-all\"").unwrap();
        assert_eq!(w.policy, EmptyResults::ShowAll);
    }
}
