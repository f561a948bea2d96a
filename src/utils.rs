use serde::Serialize;

/// Seed for one candidate's evaluation, so every (generation, candidate) pair
/// gets its own independent food layout regardless of evaluation order.
pub fn derive_seed(base: u64, generation: usize, candidate: usize) -> u64 {
    let mut z = base
        .wrapping_add((generation as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add((candidate as u64).wrapping_mul(6364136223846793005));
    // splitmix64 finalizer
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// min / max / mean over a slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

pub fn vec_stats(xs: &[f64]) -> Stats {
    if xs.is_empty() {
        return Stats { min: 0.0, max: 0.0, mean: 0.0 };
    }
    let mut mn = xs[0];
    let mut mx = xs[0];
    let mut sum = 0.0f64;
    for &v in xs {
        if v < mn {
            mn = v;
        }
        if v > mx {
            mx = v;
        }
        sum += v;
    }
    Stats { min: mn, max: mx, mean: sum / (xs.len() as f64) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_small_vector() {
        let s = vec_stats(&[1.0, -2.0, 4.0]);
        assert_eq!(s, Stats { min: -2.0, max: 4.0, mean: 1.0 });
        assert_eq!(vec_stats(&[]).mean, 0.0);
    }

    #[test]
    fn seeds_differ_per_candidate_and_generation() {
        let a = derive_seed(42, 0, 0);
        assert_eq!(a, derive_seed(42, 0, 0));
        assert_ne!(a, derive_seed(42, 0, 1));
        assert_ne!(a, derive_seed(42, 1, 0));
        assert_ne!(a, derive_seed(43, 0, 0));
    }
}
