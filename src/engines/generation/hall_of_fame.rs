use crate::types::Genome;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Clone, Debug, Serialize)]
pub struct EliteGenome {
    pub genome: Genome,
    pub fitness: f64,
    pub generation: usize,
    #[serde(skip)]
    pub canonical_string: String, // For deduplication
}

impl EliteGenome {
    pub fn new(genome: Genome, fitness: f64, generation: usize) -> Self {
        let canonical_string = get_canonical_genome_string(&genome);
        Self {
            genome,
            fitness,
            generation,
            canonical_string,
        }
    }
}

/// Best distinct genomes seen during a run, sorted by fitness (descending).
pub struct HallOfFame {
    genomes: Vec<EliteGenome>,
    max_size: usize,
    seen_signatures: HashSet<String>,
}

impl HallOfFame {
    pub fn new(max_size: usize) -> Self {
        Self {
            genomes: Vec::new(),
            max_size,
            seen_signatures: HashSet::new(),
        }
    }

    /// Attempt to add a genome to the Hall of Fame
    pub fn try_add(&mut self, elite: EliteGenome) -> bool {
        if self.seen_signatures.contains(&elite.canonical_string) {
            return false;
        }

        // Full and not better than the current worst: nothing to do.
        if self.genomes.len() >= self.max_size {
            match self.genomes.last() {
                Some(worst) if elite.fitness <= worst.fitness => return false,
                _ => {}
            }
        }

        self.seen_signatures.insert(elite.canonical_string.clone());
        self.genomes.push(elite);

        self.genomes.sort_by(|a, b| {
            b.fitness.partial_cmp(&a.fitness).unwrap_or(std::cmp::Ordering::Equal)
        });

        while self.genomes.len() > self.max_size {
            if let Some(removed) = self.genomes.pop() {
                self.seen_signatures.remove(&removed.canonical_string);
            }
        }

        true
    }

    pub fn get_all(&self) -> &[EliteGenome] {
        &self.genomes
    }

    pub fn get_top_n(&self, n: usize) -> &[EliteGenome] {
        &self.genomes[..n.min(self.genomes.len())]
    }

    pub fn best(&self) -> Option<&EliteGenome> {
        self.genomes.first()
    }

    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }
}

/// Generate canonical string for deduplication
pub fn get_canonical_genome_string(genome: &Genome) -> String {
    serde_json::to_string(genome).unwrap_or_else(|_| genome.to_listing())
}
