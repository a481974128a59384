//! Population container: Pareto ranking, crowding distances, selection,
//! crossover, and front reporting.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::Rng;
use rayon::prelude::*;

use super::individual::{Individual, Solution};

/// Errors from writing a front report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Pareto front {0} has no members")]
    EmptyFront(usize),
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// A population of [`Individual`]s plus the operations that rank, diversify,
/// and evolve it.
///
/// The population is insertion-ordered and owns its members exclusively:
/// every insertion clones, so no individual is ever shared between two
/// generations. The `evaluated` flag caches whether fitness, fronts, and
/// crowding distances are all current; any mutation clears it.
#[derive(Default)]
pub struct Generation {
    population: Vec<Individual>,
    evaluated: bool,
}

impl Generation {
    /// Empty generation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of individuals in the population.
    pub fn len(&self) -> usize {
        self.population.len()
    }

    /// True when the population holds no individuals.
    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    /// True when fitness, fronts, and crowding distances are all current.
    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    /// The individual at `index` (population order).
    pub fn individual(&self, index: usize) -> &Individual {
        &self.population[index]
    }

    /// All individuals in population order.
    pub fn individuals(&self) -> &[Individual] {
        &self.population
    }

    /// Append a deep copy of `individual` with freshly unset bookkeeping.
    /// Invalidates the evaluation cache.
    pub fn add(&mut self, individual: &Individual) {
        self.evaluated = false;
        // Individual::clone resets rank and crowding
        self.population.push(individual.clone());
    }

    /// Add a copy of every individual in `other`. The source generation is
    /// left unmodified.
    pub fn merge(&mut self, other: &Generation) {
        for individual in &other.population {
            self.add(individual);
        }
    }

    /// Evaluate the whole population: per-individual fitness in parallel,
    /// then Pareto ranking, then crowding distances.
    ///
    /// Fitness evaluation fans out over the rayon pool; each solution only
    /// reads its own genes and writes its own parameters, so no locking is
    /// needed. Ranking and crowding run on the calling thread after the
    /// parallel phase completes.
    ///
    /// Panics if the population is empty.
    pub fn evaluate(&mut self) {
        assert!(
            !self.population.is_empty(),
            "cannot evaluate an empty population"
        );

        self.population
            .par_iter_mut()
            .for_each(|individual| individual.solution_mut().evaluate());

        self.rank_by_dominance();
        self.compute_crowding();

        self.evaluated = true;
    }

    /// Partition the population into Pareto fronts.
    ///
    /// Repeated passes over the unranked pool: an individual joins the
    /// current front iff no still-unranked peer dominates it. Front numbers
    /// are dense starting at 1; every individual ends up ranked. O(F * N^2).
    ///
    /// Skipped when the evaluation cache is current. Panics if the population
    /// is empty.
    pub fn rank_by_dominance(&mut self) {
        if self.evaluated {
            return;
        }

        assert!(
            !self.population.is_empty(),
            "cannot rank an empty population"
        );

        for individual in &mut self.population {
            individual.rank = None;
            individual.crowding = None;
        }

        let mut current_front = 1;

        loop {
            let front: Vec<usize> = (0..self.population.len())
                .filter(|&i| self.population[i].rank.is_none())
                .filter(|&i| {
                    !(0..self.population.len()).any(|j| {
                        j != i
                            && self.population[j].rank.is_none()
                            && self.population[i]
                                .solution()
                                .is_dominated_by(self.population[j].solution())
                    })
                })
                .collect();

            // The non-dominated subset of a finite pool is non-empty unless
            // the dominance comparator is malformed (e.g. not irreflexive).
            assert!(
                !front.is_empty(),
                "dominance comparator produced an empty front"
            );

            for &i in &front {
                self.population[i].rank = Some(current_front);
            }

            if self.population.iter().all(|ind| ind.rank.is_some()) {
                break;
            }
            current_front += 1;
        }
    }

    /// Compute crowding distances for every front, front 1 upward, stopping
    /// at the first empty front.
    ///
    /// Skipped when the evaluation cache is current. Panics if the population
    /// is empty.
    pub fn compute_crowding(&mut self) {
        if self.evaluated {
            return;
        }

        assert!(
            !self.population.is_empty(),
            "cannot compute crowding distances for an empty population"
        );

        let mut front = 1;
        loop {
            let members = self.front_indices(front);
            if members.is_empty() {
                break;
            }
            self.crowding_for_front(&members);
            front += 1;
        }
    }

    /// Crowding distances for one front, given as population indices.
    ///
    /// Per objective dimension: sort the front by value, give the two
    /// boundary members infinite distance, and add the normalized gap
    /// between each interior member's neighbors to its running total. A
    /// dimension with zero spread across the front contributes nothing to
    /// interior members.
    fn crowding_for_front(&mut self, members: &[usize]) {
        for &i in members {
            self.population[i].crowding = Some(0.0);
        }

        let num_parameters = self.population[members[0]].solution().num_parameters();

        for par in 0..num_parameters {
            let mut by_value: Vec<(usize, f64)> = members
                .iter()
                .map(|&i| (i, self.population[i].solution().parameter_value(par)))
                .collect();

            by_value.sort_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .expect("objective values must not be NaN")
            });

            let min_value = by_value[0].1;
            let max_value = by_value[by_value.len() - 1].1;

            // Extreme values are never discarded for diversity
            self.population[by_value[0].0].crowding = Some(f64::INFINITY);
            self.population[by_value[by_value.len() - 1].0].crowding = Some(f64::INFINITY);

            let spread = max_value - min_value;
            if spread <= 0.0 {
                continue;
            }

            for w in 1..by_value.len().saturating_sub(1) {
                let (index, _) = by_value[w];
                if self.population[index].crowding == Some(f64::INFINITY) {
                    continue;
                }

                let gap = (by_value[w + 1].1 - by_value[w - 1].1) / spread;
                if let Some(distance) = self.population[index].crowding.as_mut() {
                    *distance += gap;
                }
            }
        }
    }

    /// Population indices of the members of front `front`, ranking first if
    /// any individual is currently unranked.
    fn front_indices(&mut self, front: usize) -> Vec<usize> {
        self.ensure_ranked();
        self.population
            .iter()
            .enumerate()
            .filter(|(_, ind)| ind.rank == Some(front))
            .map(|(i, _)| i)
            .collect()
    }

    /// Members of Pareto front `front` in population order, ranking first if
    /// needed. Empty when the front number is past the last front.
    pub fn pareto_front(&mut self, front: usize) -> Vec<&Individual> {
        self.ensure_ranked();
        self.population
            .iter()
            .filter(|ind| ind.rank == Some(front))
            .collect()
    }

    fn ensure_ranked(&mut self) {
        if self.population.iter().any(|ind| ind.rank.is_none()) {
            self.rank_by_dominance();
        }
    }

    /// Breed the individuals at positions `a` and `b` into `dest`.
    ///
    /// With probability `breeding_prob` the parents' gene sequences undergo
    /// uniform crossover (each position swapped with probability 0.5);
    /// otherwise both sequences pass through untouched. Clones of the two
    /// parents receive the resulting sequences and are added to `dest`, and
    /// both parents are removed from this population.
    ///
    /// `a == b` is a silent no-op. Parent removal is high-index-first so the
    /// second position is still valid after the first removal.
    pub fn breed<R: Rng>(
        &mut self,
        a: usize,
        b: usize,
        dest: &mut Generation,
        rng: &mut R,
        breeding_prob: f64,
    ) {
        if a == b {
            return;
        }

        let mut genes_a = self.population[a].genes().to_vec();
        let mut genes_b = self.population[b].genes().to_vec();

        if rng.r#gen::<f64>() < breeding_prob {
            for i in 0..genes_a.len() {
                if rng.r#gen::<f64>() < 0.5 {
                    std::mem::swap(&mut genes_a[i], &mut genes_b[i]);
                }
            }
        }

        let mut child_a = self.population[a].clone();
        let mut child_b = self.population[b].clone();
        child_a.set_genes(genes_a);
        child_b.set_genes(genes_b);
        dest.add(&child_a);
        dest.add(&child_b);

        self.evaluated = false;
        self.population.remove(a.max(b));
        self.population.remove(a.min(b));
    }

    /// Select one individual by tournament and return its position.
    ///
    /// An incumbent is drawn uniformly at random, then `tournament_size`
    /// challengers are drawn (redrawn while a challenger lands on the
    /// incumbent's position; repeats across rounds are allowed). A challenger
    /// with a strictly better (lower) Pareto rank replaces the incumbent;
    /// ties keep the incumbent.
    ///
    /// Requires a non-empty, ranked population.
    pub fn select_by_tournament<R: Rng>(&self, tournament_size: usize, rng: &mut R) -> usize {
        assert!(
            !self.population.is_empty(),
            "cannot select from an empty population"
        );

        if self.population.len() == 1 {
            return 0;
        }

        let mut incumbent = rng.gen_range(0..self.population.len());

        for _ in 0..tournament_size {
            let mut challenger = rng.gen_range(0..self.population.len());
            while challenger == incumbent {
                challenger = rng.gen_range(0..self.population.len());
            }

            let challenger_rank = self.population[challenger]
                .rank
                .expect("tournament selection requires a ranked population");
            let incumbent_rank = self.population[incumbent]
                .rank
                .expect("tournament selection requires a ranked population");

            if challenger_rank < incumbent_rank {
                incumbent = challenger;
            }
        }

        incumbent
    }

    /// Print at most the first five members of front `front` to stdout
    /// (population order), followed by a count of suppressed members when
    /// the front is larger.
    pub fn print_front(&mut self, front: usize) {
        let members = self.front_indices(front);
        let shown = members.len().min(5);

        for &i in &members[..shown] {
            println!("{}", self.population[i].format_values(true));
        }

        if shown < members.len() {
            println!("[other {} elements suppressed]", members.len() - shown);
        }
    }

    /// Write front `front` to `path`: a `# name1 --- name2 --- ` header line,
    /// then one whitespace-delimited value line per member.
    pub fn write_front(&mut self, front: usize, path: &Path) -> Result<(), ReportError> {
        let members = self.front_indices(front);
        if members.is_empty() {
            return Err(ReportError::EmptyFront(front));
        }

        let mut out = BufWriter::new(File::create(path)?);

        let first = self.population[members[0]].solution();
        write!(out, "# ")?;
        for par in 0..first.num_parameters() {
            write!(out, "{} --- ", first.parameter_name(par))?;
        }
        writeln!(out)?;

        for &i in &members {
            writeln!(out, "{}", self.population[i].format_values(false))?;
        }

        out.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generation")
            .field("population", &self.population)
            .field("evaluated", &self.evaluated)
            .finish()
    }
}

/// Build a generation from a set of solutions.
impl FromIterator<Box<dyn Solution>> for Generation {
    fn from_iter<T: IntoIterator<Item = Box<dyn Solution>>>(iter: T) -> Self {
        let mut generation = Generation::new();
        generation.population = iter.into_iter().map(Individual::new).collect();
        generation
    }
}
