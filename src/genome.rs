use crate::config::MutationKind;
use rand::Rng;
use rand::seq::index;

/// One individual = one flat weight vector.
#[derive(Clone, Debug, PartialEq)]
pub struct Genome {
    pub weights: Vec<f64>,
}

/// Gene bounds and mutation settings shared by a whole population.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneSpace {
    pub low: f64,
    pub high: f64,
}

impl GeneSpace {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.low..self.high)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.low, self.high)
    }
}

impl Genome {
    //create random individual
    pub fn random<R: Rng + ?Sized>(rng: &mut R, genes: usize, space: GeneSpace) -> Self {
        let weights = (0..genes).map(|_| space.sample(rng)).collect();
        Self { weights }
    }

    /// Single-point crossover: head of `parent_a`, tail of `parent_b`.
    pub fn crossover<R: Rng + ?Sized>(parent_a: &Genome, parent_b: &Genome, rng: &mut R) -> Self {
        let point = rng.gen_range(0..parent_a.weights.len().max(1));
        let weights = parent_a.weights[..point]
            .iter()
            .chain(&parent_b.weights[point..])
            .copied()
            .collect();
        Self { weights }
    }

    /// Mutates `count` distinct genes picked at random.
    pub fn mutate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: usize,
        kind: MutationKind,
        space: GeneSpace,
        magnitude: f64,
    ) {
        let count = count.min(self.weights.len());
        for i in index::sample(rng, self.weights.len(), count) {
            let w = &mut self.weights[i];
            *w = match kind {
                MutationKind::Random => space.sample(rng),
                MutationKind::Perturb => space.clamp(*w + rng.gen_range(-magnitude..magnitude)),
            };
        }
    }
}

/// Genes touched per child: `percent` of the genome, never fewer than one.
pub fn mutation_gene_count(percent: f64, genes: usize) -> usize {
    ((percent * genes as f64 / 100.0) as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const SPACE: GeneSpace = GeneSpace { low: -1.0, high: 1.0 };

    #[test]
    fn random_genes_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let g = Genome::random(&mut rng, 200, SPACE);
        assert_eq!(g.weights.len(), 200);
        assert!(g.weights.iter().all(|w| (-1.0..1.0).contains(w)));
    }

    #[test]
    fn crossover_takes_prefix_and_suffix() {
        let mut rng = StdRng::seed_from_u64(2);
        let a = Genome { weights: vec![0.0; 16] };
        let b = Genome { weights: vec![1.0; 16] };
        for _ in 0..20 {
            let child = Genome::crossover(&a, &b, &mut rng);
            assert_eq!(child.weights.len(), 16);
            let split = child.weights.iter().position(|&w| w == 1.0).unwrap_or(16);
            assert!(child.weights[..split].iter().all(|&w| w == 0.0));
            assert!(child.weights[split..].iter().all(|&w| w == 1.0));
        }
    }

    #[test]
    fn random_mutation_changes_exact_gene_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut g = Genome { weights: vec![5.0; 40] };
        g.mutate(&mut rng, 4, MutationKind::Random, SPACE, 0.5);
        let changed: Vec<_> = g.weights.iter().filter(|&&w| w != 5.0).collect();
        assert_eq!(changed.len(), 4);
        assert!(changed.iter().all(|&&w| (-1.0..1.0).contains(&w)));
    }

    #[test]
    fn perturb_mutation_is_clamped() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut g = Genome { weights: vec![0.99; 10] };
        g.mutate(&mut rng, 10, MutationKind::Perturb, SPACE, 0.5);
        assert!(g.weights.iter().all(|&w| (0.48..=1.0).contains(&w)));
    }

    #[test]
    fn gene_count_has_floor_of_one() {
        assert_eq!(mutation_gene_count(10.0, 96), 9);
        assert_eq!(mutation_gene_count(0.5, 96), 1);
        assert_eq!(mutation_gene_count(100.0, 96), 96);
    }
}
