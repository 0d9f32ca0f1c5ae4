//! Logistic loss statistics

/// Logistic function `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// First and second order statistics of a single sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientPair {
    pub gradient: f64,
    pub hessian: f64,
}

impl GradientPair {
    /// Gradient and hessian of logistic loss for `label` at raw score `raw`.
    pub fn logistic(label: f64, raw: f64) -> Self {
        let p = sigmoid(raw);
        Self {
            gradient: p - label,
            hessian: p * (1.0 - p),
        }
    }
}

/// Structure score of a region: `G² / (H + lambda)`.
pub fn region_score(gradient_sum: f64, hessian_sum: f64, lambda: f64) -> f64 {
    gradient_sum * gradient_sum / (hessian_sum + lambda)
}

/// Optimal leaf weight, shrunk by `eta`.
pub fn leaf_weight(gradient_sum: f64, hessian_sum: f64, lambda: f64, eta: f64) -> f64 {
    -eta * gradient_sum / (hessian_sum + lambda)
}
