//! Case-insensitive substring matching of human-facing names.

use serde::Serialize;

/// A record whose name matched a search fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate<T> {
    /// Position of the record in the upstream response.
    pub index: usize,
    /// The matched record.
    pub item: T,
}

/// Returns every item whose name contains `fragment`, ignoring case.
///
/// Candidates are ranked by upstream order: the first candidate is the one a
/// first-match-wins lookup selects. An empty fragment matches every item.
pub fn rank_matches<T, F>(items: Vec<T>, fragment: &str, name_of: F) -> Vec<Candidate<T>>
where
    F: Fn(&T) -> &str,
{
    let needle = fragment.to_lowercase();
    items
        .into_iter()
        .enumerate()
        .filter(|(_, item)| name_of(item).to_lowercase().contains(&needle))
        .map(|(index, item)| Candidate { index, item })
        .collect()
}

/// The outcome of resolving a name fragment to a single record.
///
/// Ambiguity is kept observable: every matching record is available through
/// [`Resolution::candidates`], while [`Resolution::chosen`] is the first one
/// in upstream order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution<T> {
    fragment: String,
    candidates: Vec<Candidate<T>>,
}

impl<T> Resolution<T> {
    /// Ranks `items` against `fragment`.
    ///
    /// Returns `None` when nothing matches.
    pub fn from_items<F>(items: Vec<T>, fragment: &str, name_of: F) -> Option<Self>
    where
        F: Fn(&T) -> &str,
    {
        let candidates = rank_matches(items, fragment, name_of);
        if candidates.is_empty() {
            return None;
        }
        Some(Self {
            fragment: fragment.to_string(),
            candidates,
        })
    }

    /// Returns the fragment that was searched for.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Returns the selected record.
    #[must_use]
    pub fn chosen(&self) -> &T {
        // never empty: from_items rejects an empty candidate list
        &self.candidates[0].item
    }

    /// Returns every matching record in upstream order.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate<T>] {
        &self.candidates
    }

    /// Returns true if more than one record matched.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.candidates.len() > 1
    }

    /// Consumes the resolution, returning the selected record.
    #[must_use]
    pub fn into_chosen(self) -> T {
        let mut candidates = self.candidates;
        candidates.swap_remove(0).item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<&'static str> {
        vec![
            "Pre-Season Testing",
            "Bahrain Grand Prix",
            "Saudi Arabian Grand Prix",
            "Emilia Romagna Grand Prix",
            "Italian Grand Prix",
        ]
    }

    #[test]
    fn test_first_match_wins() {
        let resolution = Resolution::from_items(names(), "grand prix", |n| *n).unwrap();
        assert_eq!(*resolution.chosen(), "Bahrain Grand Prix");
        assert_eq!(resolution.candidates().len(), 4);
        assert!(resolution.is_ambiguous());
    }

    #[test]
    fn test_case_insensitive_substring() {
        let resolution = Resolution::from_items(names(), "ITAL", |n| *n).unwrap();
        assert_eq!(resolution.into_chosen(), "Italian Grand Prix");
    }

    #[test]
    fn test_candidates_keep_upstream_index() {
        let ranked = rank_matches(names(), "AN G", |n| *n);
        let indices: Vec<_> = ranked.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![2, 4]);
        assert_eq!(ranked[0].item, "Saudi Arabian Grand Prix");
    }

    #[test]
    fn test_no_match() {
        assert!(Resolution::from_items(names(), "Monaco", |n| *n).is_none());
        assert!(Resolution::from_items(Vec::<&str>::new(), "", |n| *n).is_none());
    }

    #[test]
    fn test_empty_fragment_matches_all() {
        let resolution = Resolution::from_items(names(), "", |n| *n).unwrap();
        assert_eq!(*resolution.chosen(), "Pre-Season Testing");
        assert_eq!(resolution.candidates().len(), names().len());
        assert_eq!(resolution.fragment(), "");
    }
}
