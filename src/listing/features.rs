/// Pairs feature labels with feature values by position
///
/// Lists of different length are truncated to the shorter one. A label that
/// repeats keeps its first position and takes the later value.
pub fn zip_features(labels: Vec<String>, values: Vec<String>) -> Vec<(String, String)> {
    if labels.len() != values.len() {
        tracing::warn!(
            labels = labels.len(),
            values = values.len(),
            "Feature label/value counts differ, dropping unmatched trailing entries"
        );
    }

    let mut pairs: Vec<(String, String)> = Vec::with_capacity(labels.len().min(values.len()));
    for (label, value) in labels.into_iter().zip(values) {
        match pairs.iter_mut().find(|(existing, _)| *existing == label) {
            Some(slot) => slot.1 = value,
            None => pairs.push((label, value)),
        }
    }
    pairs
}
