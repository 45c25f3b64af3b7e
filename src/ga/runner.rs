//! GA evolutionary loop execution.
//!
//! [`EvolutionDriver`] owns the population, the generation counter, the
//! random source, and the best-so-far record, and advances the search one
//! generation per [`step`](EvolutionDriver::step):
//!
//! ```text
//! Evaluating ──► Terminated              (generation limit, time limit, cancel)
//!     │
//!     └────────► Breeding ──► Evaluating (generation + 1)
//! ```
//!
//! Breeding always seeds slot 0 of the next generation with a clone of the
//! best individual ever seen, then fills the rest with tournament-selected,
//! crossed-over and mutated offspring. [`GaRunner`] runs a driver to
//! completion in one call.

use super::config::GaConfig;
use super::selection::tournament;
use super::types::{Fitness, GaProblem, Individual};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

type FitnessOf<P> = <<P as GaProblem>::Individual as Individual>::Fitness;

/// Where the driver is in the generational cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The current population is waiting to be evaluated.
    Evaluating,
    /// Offspring are being bred from the evaluated population.
    Breeding,
    /// The run is over; further steps do nothing.
    Terminated,
}

/// Summary of one evaluated generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats<F: Fitness> {
    /// Index of the evaluated generation (0 = initial population).
    pub generation: usize,

    /// Best fitness within this generation.
    pub generation_best: F,

    /// Best fitness seen so far, this generation included.
    pub best_fitness: F,

    /// Mean fitness of this generation.
    pub mean_fitness: f64,

    /// Whether this generation produced a new best-so-far.
    pub improved: bool,

    /// Whether the driver terminated after this generation.
    pub terminated: bool,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// Generation at which `best` was found.
    pub best_generation: usize,

    /// Index of the last evaluated generation.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run hit its wall-clock time limit.
    pub timed_out: bool,

    /// Best-so-far fitness after each evaluated generation.
    pub fitness_history: Vec<f64>,
}

/// Generational GA state machine.
///
/// # Usage
///
/// ```
/// use ca_rulefind::ca::{simulate, Grid, RuleInference, RuleTable};
/// use ca_rulefind::ga::{EvolutionDriver, GaConfig};
///
/// let seed = Grid::from_ascii(".#....\n..#...\n###...\n......\n......\n......").unwrap();
/// let problem = RuleInference::new(simulate(&seed, &RuleTable::life(), 4)).unwrap();
/// let config = GaConfig::default().with_max_generations(50).with_seed(1);
///
/// let mut driver = EvolutionDriver::new(&problem, &config).unwrap();
/// while let Some(stats) = driver.step() {
///     if stats.improved {
///         println!("gen {}: {}", stats.generation, stats.best_fitness);
///     }
/// }
/// let result = driver.into_result();
/// assert!(result.best_fitness <= problem.max_error());
/// ```
pub struct EvolutionDriver<'a, P: GaProblem, R: Rng = StdRng> {
    problem: &'a P,
    config: GaConfig,
    rng: R,
    population: Vec<P::Individual>,
    generation: usize,
    phase: Phase,
    best: Option<P::Individual>,
    best_fitness: FitnessOf<P>,
    best_generation: usize,
    fitness_history: Vec<f64>,
    cancel: Option<Arc<AtomicBool>>,
    started: Option<Instant>,
    cancelled: bool,
    timed_out: bool,
}

impl<'a, P: GaProblem> EvolutionDriver<'a, P, StdRng> {
    /// Creates a driver seeded from `config.seed` (random if `None`).
    ///
    /// # Errors
    /// Returns the first configuration error reported by
    /// [`GaConfig::validate`].
    pub fn new(problem: &'a P, config: &GaConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::with_rng(problem, config, StdRng::seed_from_u64(seed))
    }
}

impl<'a, P: GaProblem, R: Rng> EvolutionDriver<'a, P, R> {
    /// Creates a driver drawing all randomness from `rng`.
    ///
    /// `config.seed` is ignored. The initial population is created here.
    pub fn with_rng(problem: &'a P, config: &GaConfig, mut rng: R) -> Result<Self> {
        config.validate()?;

        let population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();

        log::debug!(
            "initialized population of {} (max generations {}, tournament {}, mutation rate {})",
            config.population_size,
            config.max_generations,
            config.tournament_size,
            config.mutation_rate
        );

        Ok(Self {
            problem,
            config: config.clone(),
            rng,
            population,
            generation: 0,
            phase: Phase::Evaluating,
            best: None,
            best_fitness: <FitnessOf<P> as Fitness>::worst(),
            best_generation: 0,
            fitness_history: Vec::with_capacity(config.max_generations.saturating_add(1).min(1 << 16)),
            cancel: None,
            started: None,
            cancelled: false,
            timed_out: false,
        })
    }

    /// Attaches a stop flag, checked after each evaluation.
    ///
    /// When the flag reads `true` the driver terminates with the best
    /// solution found so far.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Advances exactly one generation.
    ///
    /// Evaluates and ranks the current population, records a new best if
    /// one appeared, then either terminates or breeds the next generation.
    /// Returns `None` once the driver has terminated.
    pub fn step(&mut self) -> Option<GenerationStats<FitnessOf<P>>> {
        if self.phase == Phase::Terminated {
            return None;
        }
        self.started.get_or_insert_with(Instant::now);

        // Evaluating
        evaluate_population(self.problem, &mut self.population, self.config.parallel);
        sort_by_fitness(&mut self.population);

        let generation_best = self.population[0].fitness();
        let improved = generation_best < self.best_fitness;
        if improved {
            self.best_fitness = generation_best;
            self.best = Some(self.population[0].clone());
            self.best_generation = self.generation;
            log::info!(
                "generation {}: new best fitness {:?}",
                self.generation,
                generation_best
            );
        }
        self.fitness_history.push(self.best_fitness.to_f64());
        self.problem.on_generation(self.generation, self.best_fitness);

        let mean_fitness = self
            .population
            .iter()
            .map(|ind| ind.fitness().to_f64())
            .sum::<f64>()
            / self.population.len() as f64;
        log::debug!(
            "generation {}: best {:?}, mean {:.2}, best ever {:?}",
            self.generation,
            generation_best,
            mean_fitness,
            self.best_fitness
        );

        let terminated = self.should_terminate();
        let stats = GenerationStats {
            generation: self.generation,
            generation_best,
            best_fitness: self.best_fitness,
            mean_fitness,
            improved,
            terminated,
        };

        if terminated {
            self.phase = Phase::Terminated;
            log::info!(
                "terminated at generation {} with best fitness {:?} (found at generation {})",
                self.generation,
                self.best_fitness,
                self.best_generation
            );
            return Some(stats);
        }

        self.phase = Phase::Breeding;
        self.breed();
        self.generation += 1;
        self.phase = Phase::Evaluating;

        Some(stats)
    }

    /// Steps until termination and returns the result.
    pub fn run(mut self) -> GaResult<P::Individual> {
        while self.step().is_some() {}
        self.into_result()
    }

    /// Consumes the driver and returns the best solution recorded so far.
    ///
    /// Before the first [`step`](Self::step) nothing has been evaluated and
    /// the result holds an arbitrary unevaluated individual.
    pub fn into_result(mut self) -> GaResult<P::Individual> {
        let best = match self.best.take() {
            Some(best) => best,
            None => self.population.swap_remove(0),
        };
        GaResult {
            best_fitness: best.fitness(),
            best,
            best_generation: self.best_generation,
            generations: self.generation,
            cancelled: self.cancelled,
            timed_out: self.timed_out,
            fitness_history: self.fitness_history,
        }
    }

    /// Current generation index.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the driver has terminated.
    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    /// The current population.
    ///
    /// Sorted best-first right after evaluation; after breeding, slot 0
    /// holds the elite and the rest are unevaluated offspring.
    pub fn population(&self) -> &[P::Individual] {
        &self.population
    }

    /// Best individual seen so far, if any generation has been evaluated.
    pub fn best(&self) -> Option<&P::Individual> {
        self.best.as_ref()
    }

    /// Best fitness seen so far (`Fitness::worst()` before the first step).
    pub fn best_fitness(&self) -> FitnessOf<P> {
        self.best_fitness
    }

    /// Generation at which the current best was found.
    pub fn best_generation(&self) -> usize {
        self.best_generation
    }

    /// Best-so-far fitness after each evaluated generation.
    pub fn fitness_history(&self) -> &[f64] {
        &self.fitness_history
    }

    /// Termination test, run after each evaluation.
    fn should_terminate(&mut self) -> bool {
        if self.generation >= self.config.max_generations {
            return true;
        }
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                log::info!("cancelled at generation {}", self.generation);
                self.cancelled = true;
                return true;
            }
        }
        if let (Some(limit), Some(started)) = (self.config.time_limit_ms, self.started) {
            if started.elapsed().as_millis() >= u128::from(limit) {
                log::info!("time limit of {limit} ms reached at generation {}", self.generation);
                self.timed_out = true;
                return true;
            }
        }
        false
    }

    /// Replaces the population with the next generation.
    fn breed(&mut self) {
        let size = self.config.population_size;
        let k = self.config.tournament_size;
        let rate = self.config.mutation_rate;

        let elite = self.best.as_ref().unwrap_or(&self.population[0]).clone();
        let mut next_gen: Vec<P::Individual> = Vec::with_capacity(size);
        next_gen.push(elite);

        while next_gen.len() < size {
            let p1 = tournament(&self.population, k, &mut self.rng);
            let p2 = tournament(&self.population, k, &mut self.rng);

            let mut child =
                self.problem
                    .crossover(&self.population[p1], &self.population[p2], &mut self.rng);
            self.problem.mutate(&mut child, rate, &mut self.rng);

            next_gen.push(child);
        }

        self.population = next_gen;
    }
}

/// Runs a GA to completion in one call.
///
/// # Usage
///
/// ```ignore
/// let problem = RuleInference::new(frames)?;
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best rule: {} ({} mismatches)", result.best.rule, result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Errors
    /// Returns a configuration error before any generation is evaluated.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Individual>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA will
    /// stop after the current generation's evaluation and return the best
    /// solution found so far.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Individual>> {
        let mut driver = EvolutionDriver::new(problem, config)?;
        if let Some(flag) = cancel {
            driver = driver.with_cancel(flag);
        }
        Ok(driver.run())
    }
}

/// Evaluate all individuals in the population.
///
/// The parallel path returns only after every individual is scored.
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    parallel: bool,
) {
    if parallel {
        population.par_iter_mut().for_each(|ind| {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        });
    } else {
        for ind in population.iter_mut() {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        }
    }
}

/// Stable ascending sort (best first).
fn sort_by_fitness<I: Individual>(population: &mut [I]) {
    population.sort_by(|a, b| {
        a.fitness()
            .partial_cmp(&b.fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

// ============================================================================
// Tests
// ============================================================================
