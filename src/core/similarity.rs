use crate::models::FeatureVector;

/// Square, symmetric matrix of pairwise cosine similarities
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks() panics on zero, and an empty matrix has no rows anyway
        self.values.chunks(self.size.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }
}

/// Cosine similarity between two vectors; 0 when either has zero norm
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        tracing::warn!(
            "cosine_similarity dimension mismatch: a={}, b={}",
            a.len(),
            b.len()
        );
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Build the pairwise cosine-similarity matrix of a batch
///
/// The diagonal is exactly 1 for nonzero vectors and 0 for zero vectors.
/// A batch of one is `[[1.0]]`: a lone candidate is fully typical of itself
/// even after standardisation has zeroed it.
pub fn similarity_matrix(vectors: &[FeatureVector]) -> SimilarityMatrix {
    let size = vectors.len();
    let mut values = vec![0.0; size * size];

    if size == 1 {
        values[0] = 1.0;
        return SimilarityMatrix { size, values };
    }

    for i in 0..size {
        let nonzero = vectors[i].iter().any(|&x| x != 0.0);
        values[i * size + i] = if nonzero { 1.0 } else { 0.0 };

        for j in (i + 1)..size {
            let sim = cosine_similarity(&vectors[i], &vectors[j]);
            values[i * size + j] = sim;
            values[j * size + i] = sim;
        }
    }

    SimilarityMatrix { size, values }
}

/// Mean of each row, self-similarity included
///
/// Scores are relative to the batch they were computed in and are not
/// comparable across batches.
pub fn centrality_scores(matrix: &SimilarityMatrix) -> Vec<f64> {
    let n = matrix.size() as f64;
    matrix.rows().map(|row| row.iter().sum::<f64>() / n).collect()
}
