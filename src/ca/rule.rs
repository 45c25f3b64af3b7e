//! Lookup-table rules and the candidate genome.
//!
//! A [`RuleTable`] maps `(current state, live neighbor count)` to the next
//! state. With two states and nine possible counts (0–8) the table has
//! exactly [`TABLE_SIZE`] entries, and the fixed-size array makes a partially
//! initialized table unrepresentable.
//!
//! [`RuleCandidate`] pairs a table with its fitness and is the individual the
//! evolutionary driver breeds.

use crate::error::{Result, RuleFindError};
use crate::ga::Individual;
use rand::Rng;
use std::fmt;

/// Number of distinct live-neighbor counts in a Moore neighborhood (0–8).
pub const NEIGHBOR_COUNTS: usize = 9;

/// Total number of entries (genes) in a rule table.
pub const TABLE_SIZE: usize = 2 * NEIGHBOR_COUNTS;

/// Fitness of a candidate that has not been evaluated yet.
pub const UNEVALUATED: u64 = u64::MAX;

/// A total function from `(state, neighbor count)` to next state.
///
/// Genes are ordered state-major: entries `0..9` are the dead-cell row
/// (`table[0][count]`), entries `9..18` the live-cell row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleTable {
    table: [[bool; NEIGHBOR_COUNTS]; 2],
}

impl RuleTable {
    /// Wraps an explicit table.
    pub fn from_table(table: [[bool; NEIGHBOR_COUNTS]; 2]) -> Self {
        Self { table }
    }

    /// Builds a table from birth and survival neighbor counts.
    ///
    /// A dead cell becomes alive iff its count is in `birth`; a live cell
    /// stays alive iff its count is in `survive`.
    pub fn from_birth_survival(birth: &[usize], survive: &[usize]) -> Result<Self> {
        let mut table = [[false; NEIGHBOR_COUNTS]; 2];
        for (state, counts) in [(0, birth), (1, survive)] {
            for &n in counts {
                if n >= NEIGHBOR_COUNTS {
                    return Err(RuleFindError::InvalidConfiguration(format!(
                        "neighbor count {n} out of range 0..=8"
                    )));
                }
                table[state][n] = true;
            }
        }
        Ok(Self { table })
    }

    /// The standard two-state survival/birth rule `B3/S23`.
    pub fn life() -> Self {
        let mut table = [[false; NEIGHBOR_COUNTS]; 2];
        table[0][3] = true;
        table[1][2] = true;
        table[1][3] = true;
        Self { table }
    }

    /// A table with every entry drawn as an independent fair coin flip.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut rule = Self::default();
        rule.randomize(rng);
        rule
    }

    /// Redraws every entry as an independent fair coin flip.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for row in &mut self.table {
            for gene in row.iter_mut() {
                *gene = rng.random_bool(0.5);
            }
        }
    }

    /// Next state of a cell given its current state and live neighbor count.
    ///
    /// # Panics
    /// Panics if `count > 8`.
    #[inline]
    pub fn next_state(&self, alive: bool, count: usize) -> bool {
        self.table[alive as usize][count]
    }

    /// Sets the entry for `(alive, count)`.
    ///
    /// # Panics
    /// Panics if `count > 8`.
    pub fn set(&mut self, alive: bool, count: usize, next: bool) {
        self.table[alive as usize][count] = next;
    }

    /// The raw `[state][count]` table.
    pub fn as_table(&self) -> &[[bool; NEIGHBOR_COUNTS]; 2] {
        &self.table
    }

    /// All 18 genes in state-major order.
    pub fn genes(&self) -> impl Iterator<Item = bool> + '_ {
        self.table.iter().flat_map(|row| row.iter().copied())
    }

    /// Uniform per-gene crossover.
    ///
    /// Each entry of the child is taken from `self` with probability 0.5,
    /// otherwise from `other`, so every child entry equals one parent's
    /// entry at the same position.
    pub fn crossover<R: Rng>(&self, other: &RuleTable, rng: &mut R) -> RuleTable {
        let mut table = [[false; NEIGHBOR_COUNTS]; 2];
        for (state, row) in table.iter_mut().enumerate() {
            for (count, gene) in row.iter_mut().enumerate() {
                *gene = if rng.random_bool(0.5) {
                    self.table[state][count]
                } else {
                    other.table[state][count]
                };
            }
        }
        RuleTable { table }
    }

    /// Flips each entry independently with probability `rate`.
    ///
    /// `rate >= 1.0` flips every entry, `rate <= 0.0` flips none.
    pub fn mutate<R: Rng>(&mut self, rate: f64, rng: &mut R) {
        for row in &mut self.table {
            for gene in row.iter_mut() {
                if rng.random::<f64>() < rate {
                    *gene = !*gene;
                }
            }
        }
    }

    /// Number of entries in which two tables differ.
    pub fn distance(&self, other: &RuleTable) -> usize {
        self.genes()
            .zip(other.genes())
            .filter(|(a, b)| a != b)
            .count()
    }
}

/// `B…/S…` notation, e.g. `B3/S23`.
///
/// This is exact: a table is fully determined by its birth and survival
/// counts.
impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        for (n, &born) in self.table[0].iter().enumerate() {
            if born {
                write!(f, "{n}")?;
            }
        }
        f.write_str("/S")?;
        for (n, &survives) in self.table[1].iter().enumerate() {
            if survives {
                write!(f, "{n}")?;
            }
        }
        Ok(())
    }
}

/// A rule table under evaluation, with its mismatch count.
///
/// Lower fitness is better; [`UNEVALUATED`] marks a candidate that has not
/// been scored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCandidate {
    /// The genome.
    pub rule: RuleTable,

    /// Total cell mismatches over all snapshot transitions.
    pub fitness: u64,
}

impl RuleCandidate {
    /// Wraps a table as an unevaluated candidate.
    pub fn new(rule: RuleTable) -> Self {
        Self {
            rule,
            fitness: UNEVALUATED,
        }
    }

    /// A random unevaluated candidate.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::new(RuleTable::random(rng))
    }

    /// Unevaluated child of a uniform crossover between two parents.
    pub fn crossover<R: Rng>(&self, other: &RuleCandidate, rng: &mut R) -> RuleCandidate {
        Self::new(self.rule.crossover(&other.rule, rng))
    }

    /// Flips each gene with probability `rate`.
    pub fn mutate<R: Rng>(&mut self, rate: f64, rng: &mut R) {
        self.rule.mutate(rate, rng);
    }

    /// Whether a fitness has been assigned.
    pub fn is_evaluated(&self) -> bool {
        self.fitness != UNEVALUATED
    }
}

impl Individual for RuleCandidate {
    type Fitness = u64;

    fn fitness(&self) -> u64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: u64) {
        self.fitness = fitness;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn table_from_bits(bits: u32) -> RuleTable {
        let mut rule = RuleTable::default();
        for i in 0..TABLE_SIZE {
            rule.set(i >= NEIGHBOR_COUNTS, i % NEIGHBOR_COUNTS, (bits >> i) & 1 == 1);
        }
        rule
    }

    #[test]
    fn test_life_table() {
        let life = RuleTable::life();
        for n in 0..NEIGHBOR_COUNTS {
            assert_eq!(life.next_state(false, n), n == 3, "birth at {n}");
            assert_eq!(life.next_state(true, n), n == 2 || n == 3, "survival at {n}");
        }
        assert_eq!(life.to_string(), "B3/S23");
    }

    #[test]
    fn test_from_birth_survival() {
        let rule = RuleTable::from_birth_survival(&[3], &[2, 3]).unwrap();
        assert_eq!(rule, RuleTable::life());

        let highlife = RuleTable::from_birth_survival(&[3, 6], &[2, 3]).unwrap();
        assert_eq!(highlife.to_string(), "B36/S23");

        assert!(RuleTable::from_birth_survival(&[9], &[]).is_err());
    }

    #[test]
    fn test_genes_order_is_state_major() {
        let mut rule = RuleTable::default();
        rule.set(true, 0, true);
        let genes: Vec<bool> = rule.genes().collect();
        assert_eq!(genes.len(), TABLE_SIZE);
        assert!(genes[NEIGHBOR_COUNTS]);
        assert_eq!(genes.iter().filter(|&&g| g).count(), 1);
    }

    #[test]
    fn test_randomize_is_seed_deterministic() {
        let a = RuleTable::random(&mut StdRng::seed_from_u64(3));
        let b = RuleTable::random(&mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_mutation_extremes() {
        let mut rng = StdRng::seed_from_u64(42);
        let original = RuleTable::random(&mut rng);

        let mut flipped = original;
        flipped.mutate(1.0, &mut rng);
        for (a, b) in original.genes().zip(flipped.genes()) {
            assert_eq!(a, !b);
        }

        let mut unchanged = original;
        unchanged.mutate(0.0, &mut rng);
        assert_eq!(unchanged, original);
    }

    #[test]
    fn test_crossover_of_identical_parents() {
        let mut rng = StdRng::seed_from_u64(1);
        let parent = RuleTable::random(&mut rng);
        assert_eq!(parent.crossover(&parent, &mut rng), parent);
    }

    #[test]
    fn test_crossover_mixes_complementary_parents() {
        // With complementary parents every gene reveals its origin.
        let mut rng = StdRng::seed_from_u64(5);
        let a = RuleTable::default();
        let b = table_from_bits((1 << TABLE_SIZE) - 1);

        let mut from_a = 0;
        for _ in 0..200 {
            let child = a.crossover(&b, &mut rng);
            from_a += child.genes().filter(|&g| !g).count();
        }
        let share = from_a as f64 / (200 * TABLE_SIZE) as f64;
        assert!((0.4..0.6).contains(&share), "share from a = {share}");
    }

    #[test]
    fn test_candidate_copy_is_independent() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut original = RuleCandidate::random(&mut rng);
        original.fitness = 17;

        let copy = original.clone();
        original.mutate(1.0, &mut rng);
        original.fitness = 3;

        assert_eq!(copy.fitness, 17);
        assert_eq!(copy.rule.distance(&original.rule), TABLE_SIZE);
    }

    #[test]
    fn test_new_candidate_is_unevaluated() {
        let mut rng = StdRng::seed_from_u64(0);
        let a = RuleCandidate::random(&mut rng);
        let b = RuleCandidate::random(&mut rng);
        assert!(!a.is_evaluated());
        assert!(!a.crossover(&b, &mut rng).is_evaluated());
    }

    proptest! {
        #[test]
        fn prop_crossover_gene_origin(a in 0u32..(1 << 18), b in 0u32..(1 << 18), seed in any::<u64>()) {
            let (pa, pb) = (table_from_bits(a), table_from_bits(b));
            let child = pa.crossover(&pb, &mut StdRng::seed_from_u64(seed));
            for ((c, x), y) in child.genes().zip(pa.genes()).zip(pb.genes()) {
                prop_assert!(c == x || c == y);
            }
        }

        #[test]
        fn prop_full_mutation_inverts(bits in 0u32..(1 << 18), seed in any::<u64>()) {
            let original = table_from_bits(bits);
            let mut mutated = original;
            mutated.mutate(1.0, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(mutated.distance(&original), TABLE_SIZE);
        }

        #[test]
        fn prop_display_is_exact(bits in 0u32..(1 << 18)) {
            let rule = table_from_bits(bits);
            let text = rule.to_string();
            let (b, s) = text[1..].split_once("/S").unwrap();
            let digits = |t: &str| t.chars().map(|c| c.to_digit(10).unwrap() as usize).collect::<Vec<_>>();
            let parsed = RuleTable::from_birth_survival(&digits(b), &digits(s)).unwrap();
            prop_assert_eq!(parsed, rule);
        }
    }
}
