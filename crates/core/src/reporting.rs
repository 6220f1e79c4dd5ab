//! Pure helpers behind the reporting queries.
//!
//! The free-text fields (`training_recommendations`,
//! `areas_for_improvement`) are comma-delimited tag lists by convention.
//! Tokenizing and tallying stay out of SQL so their ordering rules are
//! explicit and unit-testable.

/// A distinct tag and how many reviews mentioned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: i64,
}

/// Split a comma-delimited tag list into trimmed, non-empty tokens.
pub fn tokenize_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tally tag frequency across many tag lists.
///
/// Returns pairs sorted by descending count; ties keep first-seen order
/// (stable sort over insertion order).
pub fn tally_tags<'a, I>(texts: I) -> Vec<TagCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut order: Vec<TagCount> = Vec::new();
    let mut index: std::collections::HashMap<String, usize> = std::collections::HashMap::new();

    for text in texts {
        for token in tokenize_tags(text) {
            match index.get(&token) {
                Some(&i) => order[i].count += 1,
                None => {
                    index.insert(token.clone(), order.len());
                    order.push(TagCount {
                        tag: token,
                        count: 1,
                    });
                }
            }
        }
    }

    order.sort_by(|a, b| b.count.cmp(&a.count));
    order
}

/// Percentage of completed assignments, guarding the zero-total case.
pub fn completion_rate(completed: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    }
}
