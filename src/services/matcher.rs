//! Closest-key matching for table lookups that miss.
//!
//! Similarity is the Ratcliff/Obershelp ratio `2 * M / (|a| + |b|)`, where `M`
//! counts characters in matching blocks: take the longest common substring
//! (earliest in `a`, then earliest in `b`) and recurse on both sides of it.
//!
//! Unlike Python's `difflib.get_close_matches`, which keeps the largest key on
//! equal scores, [`closest_match`] deliberately keeps the smallest.

/// Default minimum ratio a candidate needs to be considered a match
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Similarity of two strings in `[0, 1]`; two empty strings are identical
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Picks the candidate most similar to `target`.
///
/// Candidates scoring below `cutoff` are ignored. Equal scores resolve to the
/// lexicographically smallest candidate, so the result does not depend on
/// iteration order.
pub fn closest_match<'a, I>(target: &str, candidates: I, cutoff: f64) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let target_len = target.chars().count();
    let mut best: Option<(&'a str, f64)> = None;

    for candidate in candidates {
        let candidate_len = candidate.chars().count();
        let upper_bound = length_bound(target_len, candidate_len);
        if upper_bound < cutoff {
            continue;
        }
        if let Some((_, best_score)) = best {
            if upper_bound < best_score {
                continue;
            }
        }

        let score = sequence_ratio(target, candidate);
        if score < cutoff {
            continue;
        }

        best = match best {
            Some((best_key, best_score))
                if best_score > score || (best_score == score && best_key <= candidate) =>
            {
                Some((best_key, best_score))
            }
            _ => Some((candidate, score)),
        };
    }

    best
}

/// Highest ratio two strings of these lengths could reach
fn length_bound(a_len: usize, b_len: usize) -> f64 {
    let total = a_len + b_len;
    if total == 0 {
        return 1.0;
    }
    2.0 * a_len.min(b_len) as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut pending = vec![(0, a.len(), 0, b.len())];
    let mut matched = 0;

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, len) = longest_match(a, b, alo, ahi, blo, bhi);
        if len == 0 {
            continue;
        }
        matched += len;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + len < ahi && j + len < bhi {
            pending.push((i + len, ahi, j + len, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, len)`
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);
    let width = bhi - blo;
    // run[x + 1] is the length of the common run ending at a[i], b[blo + x]
    let mut prev = vec![0usize; width + 1];
    let mut run = vec![0usize; width + 1];

    for i in alo..ahi {
        for x in 0..width {
            let j = blo + x;
            run[x + 1] = if a[i] == b[j] { prev[x] + 1 } else { 0 };
            let len = run[x + 1];
            if len > best_len {
                best_i = i + 1 - len;
                best_j = j + 1 - len;
                best_len = len;
            }
        }
        std::mem::swap(&mut prev, &mut run);
    }

    (best_i, best_j, best_len)
}
