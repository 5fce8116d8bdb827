//! Randomisation helpers used to build trial schedules.

use gonogo_core::SamplingError;
use rand::Rng;
use rand::seq::SliceRandom;

/// `n` items drawn without replacement, in random order.
pub fn sample_without_replacement<T: Clone, R: Rng>(
    rng: &mut R,
    pool: &[T],
    n: usize,
) -> Result<Vec<T>, SamplingError> {
    if n > pool.len() {
        return Err(SamplingError {
            requested: n,
            available: pool.len(),
        });
    }
    let mut items = pool.to_vec();
    let (chosen, _) = items.partial_shuffle(rng, n);
    Ok(chosen.to_vec())
}

/// `pool` concatenated with itself `times` times.
pub fn repeat<T: Clone>(pool: &[T], times: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(pool.len() * times);
    for _ in 0..times {
        out.extend_from_slice(pool);
    }
    out
}

/// Uniformly random permutation of `items`.
pub fn shuffle<T, R: Rng>(rng: &mut R, mut items: Vec<T>) -> Vec<T> {
    items.shuffle(rng);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sample_returns_distinct_pool_items() {
        let mut rng = StdRng::seed_from_u64(1);
        let pool = [1, 2, 3, 4, 5];
        let mut drawn = sample_without_replacement(&mut rng, &pool, 3).unwrap();
        assert_eq!(drawn.len(), 3);
        drawn.sort();
        drawn.dedup();
        assert_eq!(drawn.len(), 3);
        assert!(drawn.iter().all(|x| pool.contains(x)));
    }

    #[test]
    fn oversized_sample_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = sample_without_replacement(&mut rng, &["a", "b"], 3).unwrap_err();
        assert_eq!(
            err,
            SamplingError {
                requested: 3,
                available: 2
            }
        );
    }

    #[test]
    fn full_sample_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut drawn = sample_without_replacement(&mut rng, &['r', 'g', 'r'], 3).unwrap();
        drawn.sort();
        assert_eq!(drawn, vec!['g', 'r', 'r']);
    }

    #[test]
    fn repeat_concatenates_in_order() {
        assert_eq!(repeat(&['a', 'b'], 3), vec!['a', 'b', 'a', 'b', 'a', 'b']);
        assert!(repeat(&['a'], 0).is_empty());
    }

    #[test]
    fn shuffle_keeps_elements_and_is_seed_stable() {
        let items: Vec<u32> = (0..50).collect();
        let a = shuffle(&mut StdRng::seed_from_u64(3), items.clone());
        let b = shuffle(&mut StdRng::seed_from_u64(3), items.clone());
        assert_eq!(a, b);
        let mut sorted = a.clone();
        sorted.sort();
        assert_eq!(sorted, items);
    }
}
