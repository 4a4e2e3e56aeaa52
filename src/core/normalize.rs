use crate::core::error::RankingError;
use crate::models::FeatureVector;

/// Standardise each column of a batch to zero mean and unit variance
///
/// Mean and (population) standard deviation are computed from this batch
/// alone and dropped on return. A column whose values are all equal maps
/// to 0 in every row. Row order and count are preserved.
///
/// Every row must have the same width; a ragged batch (for example hospitals
/// and doctors mixed together) is rejected as `InvalidEntityData`.
pub fn standardize(vectors: &[FeatureVector]) -> Result<Vec<FeatureVector>, RankingError> {
    let Some(first) = vectors.first() else {
        return Ok(Vec::new());
    };
    let width = first.len();

    if let Some((index, row)) = vectors.iter().enumerate().find(|(_, row)| row.len() != width) {
        tracing::warn!(
            "standardize width mismatch: row 0 has {} features, row {} has {}",
            width,
            index,
            row.len()
        );
        return Err(RankingError::InvalidEntityData(format!(
            "feature vectors differ in width: expected {}, row {} has {}",
            width,
            index,
            row.len()
        )));
    }

    let n = vectors.len() as f64;
    let mut output = vec![vec![0.0; width]; vectors.len()];

    for col in 0..width {
        let column = move || vectors.iter().map(move |row| row[col]);

        let head = first[col];
        if column().all(|x| x == head) {
            continue;
        }

        // Work in units of the largest magnitude so sums of huge values stay finite
        let scale = column().fold(0.0_f64, |acc, x| acc.max(x.abs()));
        let scaled = move || column().map(move |x| x / scale);

        let mean = scaled().map(|x| x / n).sum::<f64>();
        let variance = scaled().map(|x| (x - mean).powi(2) / n).sum::<f64>();
        let std_dev = variance.sqrt();
        if std_dev == 0.0 {
            continue;
        }

        for (x, out) in scaled().zip(output.iter_mut()) {
            out[col] = (x - mean) / std_dev;
        }
    }

    Ok(output)
}
