//! Group fairness metrics: per-group confusion rates plus the standard
//! parity summaries, computed from labels/predictions and a sensitive
//! attribute. Division by zero yields `None` (`null` on the wire) rather
//! than an error.

use std::collections::BTreeMap;

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiasCheckRequest {
    pub y_true: Vec<Value>,
    pub y_pred: Option<Vec<Value>>,
    pub y_score: Option<Vec<f64>>,
    pub threshold: Option<f64>,
    pub sensitive: Vec<String>,
    pub positive_label: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMetrics {
    pub group: String,
    pub count: usize,
    /// P(pred positive | group)
    pub selection_rate: Option<f64>,
    pub tpr: Option<f64>,
    pub fpr: Option<f64>,
    pub ppv: Option<f64>,
    pub tnr: Option<f64>,
    pub fnr: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    /// max(selection rate) - min(selection rate)
    pub demographic_parity_difference: Option<f64>,
    /// min(selection rate) / max(selection rate)
    pub disparate_impact_ratio: Option<f64>,
    /// TPR span
    pub equal_opportunity_difference: Option<f64>,
    /// worse of TPR span and FPR span
    pub equalized_odds_difference: Option<f64>,
    /// PPV span
    pub predictive_parity_difference: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub n_samples: usize,
    pub n_groups: usize,
    pub positive_label: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiasReport {
    pub by_group: Vec<GroupMetrics>,
    pub summary: SummaryMetrics,
    pub metadata: ReportMetadata,
}

/// POST /api/fairness/bias-check
pub async fn handle_bias_check(
    Json(req): Json<BiasCheckRequest>,
) -> Result<Json<BiasReport>, AppError> {
    compute_bias_report(&req).map(Json)
}

pub fn compute_bias_report(req: &BiasCheckRequest) -> Result<BiasReport, AppError> {
    let positive_label = req.positive_label.clone().unwrap_or(Value::from(1));

    let predictions: Vec<bool> = match (&req.y_pred, &req.y_score, req.threshold) {
        (Some(y_pred), _, _) => {
            if y_pred.len() != req.y_true.len() {
                return Err(AppError::Validation(
                    "yTrue and yPred must have the same length".to_string(),
                ));
            }
            y_pred.iter().map(|v| *v == positive_label).collect()
        }
        (None, Some(y_score), Some(threshold)) => {
            if y_score.len() != req.y_true.len() {
                return Err(AppError::Validation(
                    "yTrue and yScore must have the same length".to_string(),
                ));
            }
            y_score.iter().map(|s| *s >= threshold).collect()
        }
        _ => {
            return Err(AppError::Validation(
                "Provide either yPred, or yScore plus threshold".to_string(),
            ));
        }
    };

    if req.sensitive.len() != req.y_true.len() {
        return Err(AppError::Validation(
            "yTrue and sensitive must have the same length".to_string(),
        ));
    }

    let actuals: Vec<bool> = req.y_true.iter().map(|v| *v == positive_label).collect();

    // Group → (actual, predicted) pairs, groups in sorted order.
    let mut groups: BTreeMap<&str, Vec<(bool, bool)>> = BTreeMap::new();
    for (i, group) in req.sensitive.iter().enumerate() {
        groups
            .entry(group.as_str())
            .or_default()
            .push((actuals[i], predictions[i]));
    }

    let by_group: Vec<GroupMetrics> = groups
        .into_iter()
        .map(|(group, pairs)| group_metrics(group, &pairs))
        .collect();

    let summary = summarize(&by_group);

    Ok(BiasReport {
        metadata: ReportMetadata {
            n_samples: req.y_true.len(),
            n_groups: by_group.len(),
            positive_label,
        },
        by_group,
        summary,
    })
}

fn group_metrics(group: &str, pairs: &[(bool, bool)]) -> GroupMetrics {
    let count = pairs.len();
    let tp = pairs.iter().filter(|(y, p)| *y && *p).count() as f64;
    let fp = pairs.iter().filter(|(y, p)| !*y && *p).count() as f64;
    let tn = pairs.iter().filter(|(y, p)| !*y && !*p).count() as f64;
    let fn_ = pairs.iter().filter(|(y, p)| *y && !*p).count() as f64;

    GroupMetrics {
        group: group.to_string(),
        count,
        selection_rate: safe_div(tp + fp, count as f64),
        tpr: safe_div(tp, tp + fn_),
        fpr: safe_div(fp, fp + tn),
        ppv: safe_div(tp, tp + fp),
        tnr: safe_div(tn, tn + fp),
        fnr: safe_div(fn_, fn_ + tp),
    }
}

fn summarize(by_group: &[GroupMetrics]) -> SummaryMetrics {
    let tpr_span = span(by_group, |m| m.tpr);
    let fpr_span = span(by_group, |m| m.fpr);

    SummaryMetrics {
        demographic_parity_difference: span(by_group, |m| m.selection_rate),
        disparate_impact_ratio: disparate_impact(by_group),
        equal_opportunity_difference: tpr_span,
        equalized_odds_difference: match (tpr_span, fpr_span) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        },
        predictive_parity_difference: span(by_group, |m| m.ppv),
    }
}

/// max - min over the groups where the metric is defined.
fn span(by_group: &[GroupMetrics], metric: impl Fn(&GroupMetrics) -> Option<f64>) -> Option<f64> {
    let values: Vec<f64> = by_group.iter().filter_map(&metric).collect();
    let max = values.iter().cloned().fold(f64::NAN, f64::max);
    let min = values.iter().cloned().fold(f64::NAN, f64::min);
    if values.is_empty() {
        None
    } else {
        Some(max - min)
    }
}

fn disparate_impact(by_group: &[GroupMetrics]) -> Option<f64> {
    let values: Vec<f64> = by_group.iter().filter_map(|m| m.selection_rate).collect();
    if values.is_empty() {
        return None;
    }
    let max = values.iter().cloned().fold(f64::NAN, f64::max);
    let min = values.iter().cloned().fold(f64::NAN, f64::min);
    safe_div(min, max)
}

fn safe_div(n: f64, d: f64) -> Option<f64> {
    if d == 0.0 {
        None
    } else {
        Some(n / d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> BiasCheckRequest {
        BiasCheckRequest {
            y_true: vec![json!(0), json!(1), json!(1), json!(0), json!(1), json!(0), json!(1), json!(0)],
            y_pred: Some(vec![
                json!(0),
                json!(1),
                json!(0),
                json!(0),
                json!(1),
                json!(0),
                json!(1),
                json!(1),
            ]),
            y_score: None,
            threshold: None,
            sensitive: ["A", "A", "B", "B", "A", "B", "A", "B"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            positive_label: None,
        }
    }

    #[test]
    fn test_simple_binary_groups() {
        let report = compute_bias_report(&fixture()).unwrap();
        assert_eq!(report.metadata.n_samples, 8);
        assert_eq!(report.by_group.len(), 2);
        for m in &report.by_group {
            let rate = m.selection_rate.unwrap();
            assert!((0.0..=1.0).contains(&rate));
        }
    }

    #[test]
    fn test_group_a_is_perfect_classifier() {
        let report = compute_bias_report(&fixture()).unwrap();
        let a = &report.by_group[0];
        assert_eq!(a.group, "A");
        assert_eq!(a.count, 4);
        assert_eq!(a.selection_rate, Some(0.75));
        assert_eq!(a.tpr, Some(1.0));
        assert_eq!(a.fpr, Some(0.0));
        assert_eq!(a.ppv, Some(1.0));
    }

    #[test]
    fn test_summary_spans() {
        let report = compute_bias_report(&fixture()).unwrap();
        let s = &report.summary;
        assert_eq!(s.demographic_parity_difference, Some(0.5));
        assert!((s.disparate_impact_ratio.unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(s.equal_opportunity_difference, Some(1.0));
        assert_eq!(s.equalized_odds_difference, Some(1.0));
        assert_eq!(s.predictive_parity_difference, Some(1.0));
    }

    #[test]
    fn test_scores_with_threshold() {
        let req = BiasCheckRequest {
            y_true: vec![json!(1), json!(0), json!(1), json!(0)],
            y_pred: None,
            y_score: Some(vec![0.9, 0.2, 0.6, 0.7]),
            threshold: Some(0.5),
            sensitive: vec!["A".into(), "A".into(), "B".into(), "B".into()],
            positive_label: None,
        };
        let report = compute_bias_report(&req).unwrap();
        assert_eq!(report.by_group[1].selection_rate, Some(1.0));
    }

    #[test]
    fn test_missing_predictions_is_validation_error() {
        let mut req = fixture();
        req.y_pred = None;
        assert!(matches!(
            compute_bias_report(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_length_mismatch_is_validation_error() {
        let mut req = fixture();
        req.sensitive.pop();
        assert!(matches!(
            compute_bias_report(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_string_positive_label() {
        let req = BiasCheckRequest {
            y_true: vec![json!("yes"), json!("no")],
            y_pred: Some(vec![json!("yes"), json!("yes")]),
            y_score: None,
            threshold: None,
            sensitive: vec!["A".into(), "A".into()],
            positive_label: Some(json!("yes")),
        };
        let report = compute_bias_report(&req).unwrap();
        assert_eq!(report.by_group[0].selection_rate, Some(1.0));
        assert_eq!(report.by_group[0].tpr, Some(1.0));
    }

    #[test]
    fn test_no_positives_yields_null_tpr() {
        let req = BiasCheckRequest {
            y_true: vec![json!(0), json!(0)],
            y_pred: Some(vec![json!(0), json!(0)]),
            y_score: None,
            threshold: None,
            sensitive: vec!["A".into(), "A".into()],
            positive_label: None,
        };
        let report = compute_bias_report(&req).unwrap();
        assert_eq!(report.by_group[0].tpr, None);
        assert_eq!(report.by_group[0].selection_rate, Some(0.0));
    }
}
