//! Frequency ranking.

use std::collections::HashMap;

/// Count occurrences and return the `k` most frequent items, descending.
///
/// Items with equal counts keep the order in which they were first seen.
pub fn top_k<I, S>(items: I, k: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut position: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for item in items {
        let item = item.as_ref();
        match position.get(item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                position.insert(item.to_string(), counts.len());
                counts.push((item.to_string(), 1));
            }
        }
    }

    // Stable sort keeps first-seen order among ties
    counts.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    counts.truncate(k);
    counts
}

/// Full frequency table, descending, first-seen order among ties.
pub fn frequencies<I, S>(items: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    top_k(items, usize::MAX)
}
