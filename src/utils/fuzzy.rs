// Text matching helpers for column detection and "did you mean" hints

/// Levenshtein distance between two strings, counted in chars
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single rolling row instead of the full matrix
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)              // deletion
                .min(curr[j - 1] + 1)            // insertion
                .min(prev[j - 1] + cost);        // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// True if `needle` occurs in `haystack`, ignoring case
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Candidates that look like a misspelling or abbreviation of `target`.
///
/// A candidate qualifies when its lowercase form is within `max_distance`
/// edits of `target`, or when it is a fragment of `target` at least three
/// characters long (e.g. "Dist" for "distribution"). Returns up to 3 names,
/// closest first.
pub fn find_near_matches(target: &str, candidates: &[String], max_distance: usize) -> Vec<(String, usize)> {
    let target_lower = target.to_lowercase();
    let mut matches: Vec<(String, usize)> = Vec::new();

    for candidate in candidates {
        let candidate_lower = candidate.trim().to_lowercase();
        if candidate_lower.is_empty() {
            continue;
        }

        let distance = levenshtein_distance(&target_lower, &candidate_lower);
        if distance <= max_distance {
            matches.push((candidate.clone(), distance));
        } else if candidate_lower.chars().count() >= 3 && target_lower.contains(&candidate_lower) {
            // Prefix fragments rank ahead of fragments from the middle
            let fragment_distance = if target_lower.starts_with(&candidate_lower) {
                max_distance
            } else {
                max_distance + 1
            };
            matches.push((candidate.clone(), fragment_distance));
        }
    }

    matches.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    matches.into_iter().take(3).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("same", "same"), 0);
        assert_eq!(levenshtein_distance("generation", "genration"), 1);
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Generation MW", "generation"));
        assert!(contains_ignore_case("TRANSMISSION", "transmission"));
        assert!(contains_ignore_case("subtransmissionline", "transmission"));
        assert!(!contains_ignore_case("Gen MW", "generation"));
    }

    #[test]
    fn test_find_near_matches() {
        let columns = names(&["Genration", "Dist", "Zone", "Tribution", "Plant"]);

        let matches = find_near_matches("generation", &columns, 3);
        assert_eq!(matches, vec![("Genration".to_string(), 1)]);

        let matches = find_near_matches("distribution", &columns, 3);
        assert_eq!(matches[0].0, "Dist");
        assert_eq!(matches[1].0, "Tribution");

        assert!(find_near_matches("consumer", &columns, 3).is_empty());
    }
}
