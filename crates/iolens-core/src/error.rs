use thiserror::Error;

/// Failures surfaced at the calculation boundary.
///
/// The engine is fully deterministic, so there are no transient failures
/// and no retry semantics: a returned error always means the inputs or the
/// configuration are wrong. Invalid values fail fast here instead of
/// propagating NaN through the vector math.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToricError {
    /// The toricity ratio evaluated to zero or below; dividing IOL-plane
    /// cylinder by it would be meaningless.
    #[error("toricity ratio must be positive, got {0}")]
    NonPositiveToricityRatio(f64),

    #[error("toric SKU catalog is empty")]
    EmptySkuCatalog,

    /// Returned by the strict policy lookup. The calculator itself keeps
    /// the historical silent fallback to "lifetime_atr".
    #[error("unknown toric policy key: {0}")]
    UnknownPolicyKey(String),

    #[error("{field} must be finite, got {value}")]
    NonFiniteInput { field: &'static str, value: f64 },

    #[error("{field} must be non-negative, got {value}")]
    NegativeMagnitude { field: &'static str, value: f64 },

    #[error("effective lens position must be positive, got {0} mm")]
    NonPositiveElp(f64),
}
