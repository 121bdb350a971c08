//! Layout helpers shared by the output backends.

use crate::types::RenderBlock;

/// Shortest text length a column is sized for.
pub const MIN_COLUMN_CHARS: usize = 4;
/// Longest text length a column is sized for.
pub const MAX_COLUMN_CHARS: usize = 40;

/// Relative column widths for a table, summing to 1.0.
///
/// Each column is weighted by the longest of its header and cells, measured
/// in characters and clamped to `MIN_COLUMN_CHARS..=MAX_COLUMN_CHARS`.
pub fn column_weights(headers: &[String], rows: &[Vec<String>]) -> Vec<f32> {
    let lengths: Vec<usize> = (0..headers.len())
        .map(|col| {
            let longest_cell = rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0);
            headers[col]
                .chars()
                .count()
                .max(longest_cell)
                .clamp(MIN_COLUMN_CHARS, MAX_COLUMN_CHARS)
        })
        .collect();

    let total: usize = lengths.iter().sum();
    if total == 0 {
        return Vec::new();
    }
    lengths
        .into_iter()
        .map(|len| len as f32 / total as f32)
        .collect()
}

/// Splits `weights` of `total` into integer widths that add up to `total`
/// exactly. The rounding remainder goes to the last column.
pub fn distribute(total: u32, weights: &[f32]) -> Vec<u32> {
    let mut widths: Vec<u32> = weights
        .iter()
        .map(|w| (w * total as f32).floor() as u32)
        .collect();
    let used: u32 = widths.iter().sum();
    if let Some(last) = widths.last_mut() {
        *last += total.saturating_sub(used);
    }
    widths
}

/// True when `block` continues a bullet list started by `previous`.
pub fn continues_list(previous: Option<&RenderBlock>, block: &RenderBlock) -> bool {
    matches!(
        (previous, block),
        (Some(RenderBlock::BulletItem(_)), RenderBlock::BulletItem(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_weights_sum_to_one() {
        let headers = strings(&["#", "Description", "Owner"]);
        let rows = vec![strings(&["1", "A fairly long risk description", "PM"])];
        let weights = column_weights(&headers, &rows);
        assert_eq!(weights.len(), 3);
        let sum: f32 = weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(weights[1] > weights[0]);
        assert!(weights[1] > weights[2]);
    }

    #[test]
    fn test_weights_are_clamped() {
        let headers = strings(&["A", "B"]);
        let rows = vec![vec!["x".repeat(500), String::new()]];
        let weights = column_weights(&headers, &rows);
        let expected = MAX_COLUMN_CHARS as f32 / (MAX_COLUMN_CHARS + MIN_COLUMN_CHARS) as f32;
        assert!((weights[0] - expected).abs() < 1e-5);
    }

    #[test]
    fn test_distribute_is_exact() {
        let widths = distribute(9360, &[0.3333, 0.3333, 0.3334]);
        assert_eq!(widths.iter().sum::<u32>(), 9360);
        assert!(distribute(100, &[]).is_empty());
    }
}
