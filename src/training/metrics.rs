use crate::label::Label;

/// Fraction of predictions equal to the truth. Zero for empty input.
pub fn accuracy(truth: &[Label], predicted: &[Label]) -> f32 {
    let n = truth.len().min(predicted.len());
    if n == 0 {
        return 0.0;
    }
    let correct = truth.iter().zip(predicted).filter(|(t, p)| t == p).count();
    correct as f32 / n as f32
}

/// Unweighted mean of per-label F1, over labels present in either input.
pub fn macro_f1(truth: &[Label], predicted: &[Label]) -> f32 {
    let mut tp = [0usize; 3];
    let mut fp = [0usize; 3];
    let mut fn_ = [0usize; 3];
    for (&t, &p) in truth.iter().zip(predicted) {
        if t == p {
            tp[t.index()] += 1;
        } else {
            fp[p.index()] += 1;
            fn_[t.index()] += 1;
        }
    }

    let scores: Vec<f32> = Label::ALL
        .iter()
        .map(|l| l.index())
        .filter(|&i| tp[i] + fp[i] + fn_[i] > 0)
        .map(|i| 2.0 * tp[i] as f32 / (2 * tp[i] + fp[i] + fn_[i]) as f32)
        .collect();

    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f32>() / scores.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Label::*;

    #[test]
    fn perfect_predictions() {
        let y = [Positive, Negative, Neutral, Positive];
        assert_eq!(accuracy(&y, &y), 1.0);
        assert!((macro_f1(&y, &y) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn mixed_predictions() {
        let truth = [Positive, Positive, Negative, Negative];
        let pred = [Positive, Negative, Negative, Negative];
        assert_eq!(accuracy(&truth, &pred), 0.75);
        // positive: 2*1/(2+0+1) = 0.667, negative: 2*2/(4+1+0) = 0.8
        assert!((macro_f1(&truth, &pred) - (2.0 / 3.0 + 0.8) / 2.0).abs() < 1e-5);
    }

    #[test]
    fn empty_input() {
        assert_eq!(accuracy(&[], &[]), 0.0);
        assert_eq!(macro_f1(&[], &[]), 0.0);
    }
}
