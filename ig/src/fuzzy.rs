//! Ranked fuzzy matching over candidate strings

use fuzzy_matcher::FuzzyMatcher as _;
use fuzzy_matcher::skim::SkimMatcherV2;

/// One hit: position in the candidate list and its score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub index: usize,
    pub score: i64,
}

/// Ranking oracle used by every filtered list
pub trait Matcher {
    /// Best match first; equal scores keep candidate order. A blank query
    /// returns every candidate in order.
    fn find(&self, query: &str, candidates: &[String]) -> Vec<Match>;
}

/// Skim-style subsequence matching, case-insensitive
pub struct SkimMatcher {
    inner: SkimMatcherV2,
}

impl Default for SkimMatcher {
    fn default() -> Self {
        Self {
            inner: SkimMatcherV2::default().ignore_case(),
        }
    }
}

impl std::fmt::Debug for SkimMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkimMatcher").finish_non_exhaustive()
    }
}

impl Matcher for SkimMatcher {
    fn find(&self, query: &str, candidates: &[String]) -> Vec<Match> {
        if query.trim().is_empty() {
            return (0..candidates.len()).map(|index| Match { index, score: 0 }).collect();
        }

        let mut matches: Vec<Match> = candidates
            .iter()
            .enumerate()
            .filter_map(|(index, candidate)| {
                self.inner
                    .fuzzy_match(candidate, query)
                    .map(|score| Match { index, score })
            })
            .collect();

        // stable sort keeps candidate order on ties
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches
    }
}

/// Convenience over [`SkimMatcher`] for one-off searches
pub fn find(query: &str, candidates: &[String]) -> Vec<Match> {
    SkimMatcher::default().find(query, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_query_keeps_order() {
        let candidates = list(&["Go", "Node", "Python"]);
        let indices: Vec<usize> = find("", &candidates).into_iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(find("   ", &candidates).len(), 3);
    }

    #[test]
    fn test_subsequence_match_case_insensitive() {
        let candidates = list(&["Go", "Node", "Python", "JetBrains"]);
        let hits: Vec<&str> = find("PY", &candidates)
            .into_iter()
            .map(|m| candidates[m.index].as_str())
            .collect();
        assert_eq!(hits, vec!["Python"]);

        let hits: Vec<&str> = find("jb", &candidates)
            .into_iter()
            .map(|m| candidates[m.index].as_str())
            .collect();
        assert_eq!(hits, vec!["JetBrains"]);
    }

    #[test]
    fn test_no_match() {
        assert!(find("zzz", &list(&["Go", "Node"])).is_empty());
    }

    #[test]
    fn test_ranked_best_first() {
        let candidates = list(&["Global/Xcode", "Go"]);
        let hits = find("go", &candidates);
        assert_eq!(hits.len(), 2);
        assert_eq!(candidates[hits[0].index], "Go");
    }

    #[test]
    fn test_ties_keep_candidate_order() {
        let candidates = list(&["node", "node"]);
        let indices: Vec<usize> = find("node", &candidates).into_iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }
}
