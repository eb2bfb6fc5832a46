//! Small text helpers used by the site directory and dashboard listing

/// Turn a display name into a URL-friendly slug
///
/// "Human Resources & Benefits" becomes "human-resources-benefits".
pub fn generate_slug(text: &str) -> String {
    let cleaned: String = text
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    cleaned
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Trim and cut `text` to at most `max_len` characters, appending "..." when cut
pub fn truncate_text(text: &str, max_len: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_len {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(max_len).collect();
    format!("{}...", cut.trim_end())
}

/// Case-insensitive substring filter across the fields `fields` extracts
///
/// A blank search term keeps every item.
pub fn filter_by_search<'a, T, F>(items: &'a [T], term: &str, fields: F) -> Vec<&'a T>
where
    F: Fn(&T) -> Vec<&str>,
{
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| {
            fields(item)
                .into_iter()
                .any(|value| value.to_lowercase().contains(&term))
        })
        .collect()
}

/// Sort direction for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Stable sort by a key, in either direction
pub fn sort_by_field<T, K, F>(items: &mut [T], key: F, direction: SortDirection)
where
    K: Ord,
    F: Fn(&T) -> K,
{
    items.sort_by(|a, b| {
        let ordering = key(a).cmp(&key(b));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_slug() {
        assert_eq!(generate_slug("Human Resources"), "human-resources");
        assert_eq!(generate_slug("  R&D -- Team_2 "), "rd-team-2");
        assert_eq!(generate_slug("---"), "");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("  short  ", 10), "short");
        assert_eq!(truncate_text("Employee policies", 8), "Employee...");
        assert_eq!(truncate_text("Employee policies", 9), "Employee...");
    }

    #[test]
    fn test_filter_by_search() {
        let items = vec![("Finance", "Budgets"), ("Marketing", "Brand guidelines")];
        let hits = filter_by_search(&items, "BRAND", |(a, b)| vec![*a, *b]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, "Marketing");

        let all = filter_by_search(&items, "   ", |(a, b)| vec![*a, *b]);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_sort_by_field() {
        let mut items = vec![3, 1, 2];
        sort_by_field(&mut items, |v| *v, SortDirection::Descending);
        assert_eq!(items, vec![3, 2, 1]);
        sort_by_field(&mut items, |v| *v, SortDirection::Ascending);
        assert_eq!(items, vec![1, 2, 3]);
    }
}
