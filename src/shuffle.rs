//! Fisher-Yates shuffling over any `rand::Rng`.

use rand::Rng;

/// Uniformly permute `items` in place.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
  for i in (1..items.len()).rev() {
    let j = rng.gen_range(0..=i);
    items.swap(i, j);
  }
}

/// By-value variant; the input is consumed and returned permuted.
pub fn shuffled<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Vec<T> {
  shuffle_in_place(&mut items, rng);
  items
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};
  use std::collections::HashSet;

  #[test]
  fn empty_and_single_are_unchanged() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(shuffled(Vec::<u8>::new(), &mut rng).is_empty());
    assert_eq!(shuffled(vec!["only"], &mut rng), vec!["only"]);
  }

  #[test]
  fn keeps_the_multiset() {
    let mut rng = StdRng::seed_from_u64(7);
    let input = vec![3, 1, 4, 1, 5, 9, 2, 6];
    let mut out = shuffled(input.clone(), &mut rng);
    let mut expected = input;
    out.sort_unstable();
    expected.sort_unstable();
    assert_eq!(out, expected);
  }

  #[test]
  fn reaches_every_ordering_of_three() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut seen = HashSet::new();
    for _ in 0..600 {
      seen.insert(shuffled(vec!['a', 'b', 'c'], &mut rng));
    }
    assert_eq!(seen.len(), 6);
  }

  #[test]
  fn repeated_shuffles_differ() {
    let mut rng = rand::thread_rng();
    let base: Vec<u32> = (0..4).collect();
    let first = shuffled(base.clone(), &mut rng);
    let varied = (0..50).any(|_| shuffled(base.clone(), &mut rng) != first);
    assert!(varied);
  }
}
