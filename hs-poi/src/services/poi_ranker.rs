//! Nearest-first ordering and per-category aggregation of search results

use crate::models::{CategorySummary, Place};

/// Sort places nearest first; equal distances keep their incoming order
pub fn rank_by_distance(places: &mut [Place]) {
    places.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
}

/// Count and nearest place of an already ranked list
pub fn summarize(category: &str, places: &[Place]) -> CategorySummary {
    CategorySummary {
        category: category.to_string(),
        count: places.len(),
        closest: places.first().cloned(),
    }
}

/// First `n` places of an already ranked list
pub fn top_places(places: &[Place], n: usize) -> Vec<Place> {
    places.iter().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rating;
    use hs_common::Coordinate;

    fn place(name: &str, distance_m: f64) -> Place {
        Place {
            name: name.to_string(),
            vicinity: "somewhere".to_string(),
            rating: Rating::Unrated,
            location: Coordinate::new(0.0, 0.0),
            distance_m,
        }
    }

    #[test]
    fn test_summary_of_three() {
        let places = vec![place("A", 12.0), place("B", 40.0), place("C", 90.0)];
        let summary = summarize("x", &places);

        assert_eq!(summary.count, 3);
        assert_eq!(summary.closest.as_ref().map(|p| p.name.as_str()), Some("A"));
        assert_eq!(summary.columns()[0], "3");
        assert_eq!(summary.columns()[2], "12");
    }

    #[test]
    fn test_summary_of_none() {
        let summary = summarize("y", &[]);
        assert_eq!(summary, CategorySummary::empty("y"));
    }

    #[test]
    fn test_summary_does_not_resort() {
        // Callers pass ranked lists; the first entry is taken as-is
        let places = vec![place("Listed first", 300.0), place("Closer", 10.0)];
        let summary = summarize("z", &places);
        assert_eq!(summary.closest.map(|p| p.name), Some("Listed first".to_string()));
    }

    #[test]
    fn test_rank_is_stable() {
        let mut places = vec![
            place("far", 500.0),
            place("tie-1", 100.0),
            place("near", 5.0),
            place("tie-2", 100.0),
        ];
        rank_by_distance(&mut places);

        let names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["near", "tie-1", "tie-2", "far"]);
    }

    #[test]
    fn test_top_places() {
        let places: Vec<Place> = (0..8).map(|i| place(&format!("p{i}"), i as f64)).collect();
        let top = top_places(&places, 5);
        assert_eq!(top.len(), 5);
        assert_eq!(top[4].name, "p4");

        assert_eq!(top_places(&places[..2], 5).len(), 2);
    }
}
