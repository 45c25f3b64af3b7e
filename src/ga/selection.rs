//! Parent selection.
//!
//! Tournament selection: draw `k` individuals uniformly at random **with
//! replacement** and keep the fittest. Larger `k` means stronger selection
//! pressure; the same individual may be drawn more than once.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Individual;
use rand::Rng;

/// Returns the index of the fittest of `k` uniformly drawn individuals.
///
/// Ties keep the individual drawn first. `k = 0` is treated as `k = 1`.
///
/// # Complexity
/// O(k) per selection
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() < population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Clone)]
    struct TestInd {
        fit: u64,
    }

    impl Individual for TestInd {
        type Fitness = u64;
        fn fitness(&self) -> u64 {
            self.fit
        }
        fn set_fitness(&mut self, f: u64) {
            self.fit = f;
        }
    }

    fn make_population(fitnesses: &[u64]) -> Vec<TestInd> {
        fitnesses.iter().map(|&f| TestInd { fit: f }).collect()
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10, 5, 1, 8]);
        let mut rng = StdRng::seed_from_u64(42);

        // With replacement, P(best drawn at least once in 4) = 1 - (3/4)^4 ≈ 0.68
        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[tournament(&pop, 4, &mut rng)] += 1;
        }
        let best_count = counts[2];
        assert!(
            best_count > 6000,
            "expected best to be selected >60% of the time, got {best_count}/{n}"
        );
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[10, 5, 1, 8]);
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[tournament(&pop, 1, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_worst_never_wins_against_others() {
        // The worst can only win a tournament made entirely of itself.
        let pop = make_population(&[3, 9, 3, 3, 3]);
        let mut rng = StdRng::seed_from_u64(1);

        let mut worst_wins = 0;
        for _ in 0..5000 {
            if tournament(&pop, 5, &mut rng) == 1 {
                worst_wins += 1;
            }
        }
        // (1/5)^5 = 0.00032 → about 1.6 expected wins
        assert!(worst_wins < 20, "worst won {worst_wins} times");
    }

    #[test]
    fn test_ties_keep_first_drawn() {
        let pop = make_population(&[5, 5, 5, 5]);
        let mut a = StdRng::seed_from_u64(17);
        let mut b = StdRng::seed_from_u64(17);

        for _ in 0..100 {
            let first_drawn = b.random_range(0..4usize);
            for _ in 1..3 {
                let _ = b.random_range(0..4usize);
            }
            assert_eq!(tournament(&pop, 3, &mut a), first_drawn);
        }
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5]);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(tournament(&pop, 3, &mut rng), 0);
        assert_eq!(tournament(&pop, 0, &mut rng), 0);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<TestInd> = vec![];
        let mut rng = StdRng::seed_from_u64(42);
        tournament(&pop, 3, &mut rng);
    }
}
