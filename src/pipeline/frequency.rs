use std::collections::HashMap;

use crate::color::Color;
use crate::error::{ExtractError, Result};

/// An exact RGB tuple and how many sampled pixels match it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub color: Color,
    pub count: u64,
    first_seen: usize,
}

/// Count exact color matches and keep the `k` most frequent.
///
/// Ties keep the order in which the colors were first encountered, so the
/// result is fully deterministic for a given pixel sequence.
pub fn top_colors<I>(pixels: I, k: usize) -> Result<Vec<Bucket>>
where
    I: IntoIterator<Item = Color>,
{
    if k == 0 {
        return Err(ExtractError::invalid("k", k, "must be at least 1"));
    }

    let mut buckets: HashMap<Color, Bucket> = HashMap::new();
    for (i, color) in pixels.into_iter().enumerate() {
        buckets
            .entry(color)
            .or_insert(Bucket {
                color,
                count: 0,
                first_seen: i,
            })
            .count += 1;
    }

    let mut sorted: Vec<Bucket> = buckets.into_values().collect();
    sorted.sort_unstable_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.first_seen.cmp(&b.first_seen))
    });
    sorted.truncate(k);
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_frequent_first() {
        let a = Color::new(1, 1, 1);
        let b = Color::new(2, 2, 2);
        let c = Color::new(3, 3, 3);
        let pixels = vec![a, b, b, c, c, c];

        let top = top_colors(pixels, 5).unwrap();
        let got: Vec<(Color, u64)> = top.iter().map(|b| (b.color, b.count)).collect();
        assert_eq!(got, vec![(c, 3), (b, 2), (a, 1)]);
    }

    #[test]
    fn truncates_to_k() {
        let pixels: Vec<Color> = (0..10u8).map(|v| Color::new(v, v, v)).collect();
        assert_eq!(top_colors(pixels, 4).unwrap().len(), 4);
    }

    #[test]
    fn ties_follow_first_occurrence() {
        let x = Color::new(9, 0, 0);
        let y = Color::new(0, 9, 0);
        let z = Color::new(0, 0, 9);
        let pixels = vec![y, x, z, x, y, z];

        let top = top_colors(pixels, 3).unwrap();
        let order: Vec<Color> = top.iter().map(|b| b.color).collect();
        assert_eq!(order, vec![y, x, z]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(top_colors(Vec::new(), 3).unwrap().is_empty());
    }

    #[test]
    fn zero_k_is_rejected() {
        let err = top_colors(vec![Color::new(0, 0, 0)], 0).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidParameter { parameter: "k", .. }));
    }
}
