use crate::model::Country;

/// A catalog entry that survived matching, with its edit distance to the
/// query. Lower is better; position in the returned vector is the rank.
pub struct Ranked<'a> {
    pub country: &'a Country,
    pub distance: usize,
}

pub struct FuzzyRanker;

impl FuzzyRanker {
    /// Approximate matching is compiled in behind the `fuzzy` feature.
    /// Builds without it get `None` and the engine reports ranking as
    /// unavailable instead of silently returning no matches.
    #[cfg(feature = "fuzzy")]
    pub fn obtain() -> Option<FuzzyRanker> {
        Some(FuzzyRanker)
    }

    #[cfg(not(feature = "fuzzy"))]
    pub fn obtain() -> Option<FuzzyRanker> {
        None
    }

    /// Rank `candidates` against `query`. A candidate survives only if some
    /// substring of its label is within `max_dist` edits of the query;
    /// everything else is dropped. Survivors are sorted ascending by
    /// distance with a stable sort, so the caller's ordering (recency
    /// first) breaks ties.
    ///
    /// Comparison is case-insensitive: both sides are Unicode-lowercased,
    /// with no further normalization.
    pub fn rank<'a>(
        &self,
        query: &str,
        candidates: &[&'a Country],
        max_dist: usize,
    ) -> Vec<Ranked<'a>> {
        let needle: Vec<char> = query.to_lowercase().chars().collect();

        let mut ranked: Vec<Ranked<'a>> = candidates
            .iter()
            .filter_map(|&country| {
                let haystack: Vec<char> = country.label.to_lowercase().chars().collect();
                let distance = substring_distance(&needle, &haystack);
                (distance <= max_dist).then_some(Ranked { country, distance })
            })
            .collect();

        ranked.sort_by_key(|r| r.distance);
        ranked
    }
}

/// Minimum edit distance between `needle` and any substring of `haystack`.
/// Insert, delete, substitute and adjacent transposition each cost one
/// edit; the match may start and end anywhere in the haystack.
fn substring_distance(needle: &[char], haystack: &[char]) -> usize {
    let n = needle.len();
    let h = haystack.len();
    if n == 0 {
        return 0;
    }
    if h == 0 {
        return n;
    }

    // matrix[i][j] is the distance between needle[..i] and the best
    // substring of haystack ending at j. Row 0 stays zero so a match may
    // start at any haystack position.
    let mut matrix: Vec<Vec<usize>> = vec![vec![0; h + 1]; n + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }

    for i in 1..=n {
        for j in 1..=h {
            let cost = if needle[i - 1] == haystack[j - 1] { 0 } else { 1 };

            let mut d = (matrix[i - 1][j] + 1)         // deletion
                .min(matrix[i][j - 1] + 1)             // insertion
                .min(matrix[i - 1][j - 1] + cost);     // substitution

            // Adjacent swap counts as a single edit ("untied" -> "united")
            if i > 1
                && j > 1
                && needle[i - 1] == haystack[j - 2]
                && needle[i - 2] == haystack[j - 1]
            {
                d = d.min(matrix[i - 2][j - 2] + 1);
            }

            matrix[i][j] = d;
        }
    }

    // Free end: take the best distance over all end positions.
    matrix[n].iter().copied().min().unwrap_or(n)
}
