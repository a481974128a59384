//! Candidate solutions and their per-individual Pareto bookkeeping.

use std::fmt::Write as _;

/// Capability interface implemented by domain-specific candidate solutions.
///
/// A `Solution` owns a gene sequence (the decision encoding) and the objective
/// parameters derived from it. The optimizer only talks to solutions through
/// this trait: it asks them to evaluate themselves, compares them by
/// dominance, and recombines their genes. What the parameters mean, and
/// whether a given objective is minimized or maximized, is entirely the
/// implementor's concern.
///
/// `Send + Sync` is required so a population can be evaluated across a rayon
/// worker pool; `evaluate` must only touch `self`.
pub trait Solution: Send + Sync {
    /// Recompute the objective parameters from the current genes.
    fn evaluate(&mut self);

    /// Number of objective parameters. Fixed for the lifetime of a solution.
    fn num_parameters(&self) -> usize;

    /// Value of the objective parameter at `index`.
    fn parameter_value(&self, index: usize) -> f64;

    /// Name of the objective parameter at `index`, used in report headers.
    fn parameter_name(&self, index: usize) -> &str;

    /// The decision encoding.
    fn genes(&self) -> &[i32];

    /// Replace the decision encoding wholesale.
    fn set_genes(&mut self, genes: Vec<i32>);

    /// Independent deep copy of this solution.
    fn boxed_clone(&self) -> Box<dyn Solution>;

    /// True iff `other` dominates this solution.
    ///
    /// The default body implements the minimize convention: `other` is at
    /// least as good (no greater) in every parameter and strictly better
    /// (smaller) in at least one. Implementations with maximized objectives
    /// override this to encode their own direction per parameter.
    fn is_dominated_by(&self, other: &dyn Solution) -> bool {
        let mut strictly_better = false;

        for par in 0..self.num_parameters() {
            let mine = self.parameter_value(par);
            let theirs = other.parameter_value(par);

            if theirs > mine {
                return false;
            }
            if theirs < mine {
                strictly_better = true;
            }
        }

        strictly_better
    }
}

/// One member of a [`Generation`](super::Generation)'s population: a boxed
/// [`Solution`] plus the ranking and diversity bookkeeping the optimizer
/// maintains for it.
///
/// Cloning an `Individual` deep-copies the solution and resets the
/// bookkeeping, so a clone never aliases its source and never carries stale
/// rank or crowding values into another population.
pub struct Individual {
    solution: Box<dyn Solution>,
    /// Pareto front number, 1 = globally non-dominated. `None` until ranked.
    pub(crate) rank: Option<usize>,
    /// Crowding distance within the front; `f64::INFINITY` marks a boundary
    /// member that must never be discarded for diversity. `None` until set.
    pub(crate) crowding: Option<f64>,
}

impl Individual {
    /// Wrap a solution with unset bookkeeping.
    pub fn new(solution: Box<dyn Solution>) -> Self {
        Self {
            solution,
            rank: None,
            crowding: None,
        }
    }

    /// Pareto front number, if ranking has run.
    pub fn rank(&self) -> Option<usize> {
        self.rank
    }

    /// Crowding distance, if it has been computed.
    pub fn crowding_distance(&self) -> Option<f64> {
        self.crowding
    }

    /// The wrapped solution.
    pub fn solution(&self) -> &dyn Solution {
        self.solution.as_ref()
    }

    pub(crate) fn solution_mut(&mut self) -> &mut dyn Solution {
        self.solution.as_mut()
    }

    /// The decision encoding.
    pub fn genes(&self) -> &[i32] {
        self.solution.genes()
    }

    /// Replace the decision encoding. Rank and crowding become stale and are
    /// reset to unset.
    pub fn set_genes(&mut self, genes: Vec<i32>) {
        self.rank = None;
        self.crowding = None;
        self.solution.set_genes(genes);
    }

    /// Format the parameter vector as a single line, whitespace-delimited,
    /// optionally prefixed with each parameter's name.
    pub fn format_values(&self, with_names: bool) -> String {
        let mut line = String::new();

        for par in 0..self.solution.num_parameters() {
            if with_names {
                let _ = write!(
                    line,
                    "{} = {} ",
                    self.solution.parameter_name(par),
                    self.solution.parameter_value(par)
                );
            } else {
                let _ = write!(line, "{} ", self.solution.parameter_value(par));
            }
        }

        line.trim_end().to_string()
    }
}

impl Clone for Individual {
    fn clone(&self) -> Self {
        Self {
            solution: self.solution.boxed_clone(),
            rank: None,
            crowding: None,
        }
    }
}

impl std::fmt::Debug for Individual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Individual")
            .field("genes", &self.solution.genes())
            .field("rank", &self.rank)
            .field("crowding", &self.crowding)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Solution;

    /// Test solution with preset objective values: `evaluate` copies the
    /// preset values into the live parameter vector.
    #[derive(Clone)]
    pub struct PointSolution {
        pub genes: Vec<i32>,
        pub preset: Vec<f64>,
        pub parameters: Vec<f64>,
    }

    impl PointSolution {
        pub fn new(values: Vec<f64>) -> Self {
            Self {
                genes: vec![0; values.len()],
                preset: values.clone(),
                parameters: values,
            }
        }

        pub fn with_genes(genes: Vec<i32>, values: Vec<f64>) -> Self {
            Self {
                genes,
                preset: values.clone(),
                parameters: values,
            }
        }
    }

    impl Solution for PointSolution {
        fn evaluate(&mut self) {
            self.parameters = self.preset.clone();
        }

        fn num_parameters(&self) -> usize {
            self.parameters.len()
        }

        fn parameter_value(&self, index: usize) -> f64 {
            self.parameters[index]
        }

        fn parameter_name(&self, index: usize) -> &str {
            const NAMES: [&str; 4] = ["p0", "p1", "p2", "p3"];
            NAMES[index]
        }

        fn genes(&self) -> &[i32] {
            &self.genes
        }

        fn set_genes(&mut self, genes: Vec<i32>) {
            self.genes = genes;
        }

        fn boxed_clone(&self) -> Box<dyn Solution> {
            Box::new(self.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::PointSolution;
    use super::*;

    #[test]
    fn test_default_dominance_minimize() {
        let a = PointSolution::new(vec![1.0, 1.0]);
        let b = PointSolution::new(vec![0.5, 1.0]);
        let c = PointSolution::new(vec![2.0, 0.5]);

        // b is at least as good everywhere and strictly better in p0
        assert!(a.is_dominated_by(&b));
        assert!(!b.is_dominated_by(&a));

        // a and c trade off: neither dominates
        assert!(!a.is_dominated_by(&c));
        assert!(!c.is_dominated_by(&a));
    }

    #[test]
    fn test_equal_solutions_do_not_dominate() {
        let a = PointSolution::new(vec![1.0, 2.0]);
        let b = PointSolution::new(vec![1.0, 2.0]);
        assert!(!a.is_dominated_by(&b));
        assert!(!b.is_dominated_by(&a));
    }

    #[test]
    fn test_clone_isolation() {
        let source = Individual::new(Box::new(PointSolution::with_genes(
            vec![1, 2, 3],
            vec![0.5],
        )));

        let mut copy = source.clone();
        copy.set_genes(vec![9, 9, 9]);

        assert_eq!(source.genes(), &[1, 2, 3]);
        assert_eq!(copy.genes(), &[9, 9, 9]);
    }

    #[test]
    fn test_clone_resets_bookkeeping() {
        let mut source = Individual::new(Box::new(PointSolution::new(vec![1.0])));
        source.rank = Some(3);
        source.crowding = Some(0.25);

        let copy = source.clone();
        assert_eq!(copy.rank(), None);
        assert_eq!(copy.crowding_distance(), None);
    }

    #[test]
    fn test_set_genes_resets_bookkeeping() {
        let mut individual = Individual::new(Box::new(PointSolution::new(vec![1.0])));
        individual.rank = Some(1);
        individual.crowding = Some(f64::INFINITY);

        individual.set_genes(vec![7]);
        assert_eq!(individual.rank(), None);
        assert_eq!(individual.crowding_distance(), None);
    }

    #[test]
    fn test_format_values() {
        let individual = Individual::new(Box::new(PointSolution::new(vec![1.5, 2.0])));
        assert_eq!(individual.format_values(false), "1.5 2");
        assert_eq!(individual.format_values(true), "p0 = 1.5 p1 = 2");
    }
}
