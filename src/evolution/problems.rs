//! Built-in benchmark problem so the CLI, benches, and tests have a concrete
//! fitness capability without an external simulator.

use rand::Rng;

use super::individual::Solution;

/// ZDT1 two-objective benchmark over an integer gene encoding.
///
/// Each gene holds an integer in `[0, GENE_SCALE]` decoded to a decision
/// variable in `[0, 1]`. Both objectives are minimized; the true Pareto
/// front is `f2 = 1 - sqrt(f1)` with all genes past the first at zero.
#[derive(Clone)]
pub struct Zdt1Solution {
    genes: Vec<i32>,
    parameters: Vec<f64>,
}

impl Zdt1Solution {
    /// Integer range of one gene; gene / GENE_SCALE is the decision variable.
    pub const GENE_SCALE: i32 = 1000;

    const PARAMETER_NAMES: [&'static str; 2] = ["f1", "f2"];

    /// Build from an explicit gene sequence. At least two genes.
    pub fn new(genes: Vec<i32>) -> Self {
        assert!(genes.len() >= 2, "ZDT1 needs at least two genes");
        Self {
            genes,
            parameters: vec![0.0; 2],
        }
    }

    /// Build with `len` uniformly random genes.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        let genes = (0..len)
            .map(|_| rng.gen_range(0..=Self::GENE_SCALE))
            .collect();
        Self::new(genes)
    }

    fn variable(&self, index: usize) -> f64 {
        f64::from(self.genes[index].clamp(0, Self::GENE_SCALE)) / f64::from(Self::GENE_SCALE)
    }
}

impl Solution for Zdt1Solution {
    fn evaluate(&mut self) {
        let f1 = self.variable(0);

        let tail: f64 = (1..self.genes.len()).map(|i| self.variable(i)).sum();
        let g = 1.0 + 9.0 * tail / (self.genes.len() - 1) as f64;
        let f2 = g * (1.0 - (f1 / g).sqrt());

        self.parameters = vec![f1, f2];
    }

    fn num_parameters(&self) -> usize {
        self.parameters.len()
    }

    fn parameter_value(&self, index: usize) -> f64 {
        self.parameters[index]
    }

    fn parameter_name(&self, index: usize) -> &str {
        Self::PARAMETER_NAMES[index]
    }

    fn genes(&self) -> &[i32] {
        &self.genes
    }

    fn set_genes(&mut self, genes: Vec<i32>) {
        assert!(genes.len() >= 2, "ZDT1 needs at least two genes");
        self.genes = genes;
    }

    fn boxed_clone(&self) -> Box<dyn Solution> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ideal_point() {
        // All genes zero: f1 = 0, g = 1, f2 = 1
        let mut solution = Zdt1Solution::new(vec![0, 0, 0, 0]);
        solution.evaluate();

        assert_eq!(solution.parameter_value(0), 0.0);
        assert!((solution.parameter_value(1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pareto_front_shape() {
        // Tail genes zero puts the point on the true front: f2 = 1 - sqrt(f1)
        let mut solution = Zdt1Solution::new(vec![250, 0, 0, 0]);
        solution.evaluate();

        let f1 = solution.parameter_value(0);
        let f2 = solution.parameter_value(1);
        assert!((f1 - 0.25).abs() < 1e-12);
        assert!((f2 - (1.0 - 0.25f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn test_dominated_off_front() {
        let mut on_front = Zdt1Solution::new(vec![250, 0, 0, 0]);
        let mut off_front = Zdt1Solution::new(vec![250, 900, 900, 900]);
        on_front.evaluate();
        off_front.evaluate();

        assert!(off_front.is_dominated_by(&on_front));
        assert!(!on_front.is_dominated_by(&off_front));
    }

    #[test]
    fn test_random_genes_in_range() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(17);
        let solution = Zdt1Solution::random(10, &mut rng);

        assert_eq!(solution.genes().len(), 10);
        for &gene in solution.genes() {
            assert!((0..=Zdt1Solution::GENE_SCALE).contains(&gene));
        }
    }
}
