//! Tagged outcome of a metric computation.
//!
//! A scalar summary is either `Computed` or `Unavailable` with a reason, so the
//! reporting layer can tell "no input file" apart from "the numbers degenerated".

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Reading<T> {
    Computed(T),
    Unavailable(Unavailable),
}

/// Why a reading could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Unavailable {
    /// An input dataset was absent; the pipeline was never invoked.
    MissingInput { what: String },
    /// Alignment left fewer rows than the statistic needs.
    InsufficientData { needed: usize, found: usize },
    /// The data exist but the statistic is undefined on them.
    Degenerate { cause: Degeneracy },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Degeneracy {
    ZeroVariance,
    NonPositiveDiagonal,
    SingularCovariance,
    NonPositiveSpan,
}

impl<T> Reading<T> {
    pub fn missing(what: impl Into<String>) -> Self {
        Reading::Unavailable(Unavailable::MissingInput { what: what.into() })
    }

    pub fn insufficient(needed: usize, found: usize) -> Self {
        Reading::Unavailable(Unavailable::InsufficientData { needed, found })
    }

    pub fn degenerate(cause: Degeneracy) -> Self {
        Reading::Unavailable(Unavailable::Degenerate { cause })
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Reading::Computed(_))
    }

    pub fn computed(&self) -> Option<&T> {
        match self {
            Reading::Computed(value) => Some(value),
            Reading::Unavailable(_) => None,
        }
    }

    pub fn into_computed(self) -> Option<T> {
        match self {
            Reading::Computed(value) => Some(value),
            Reading::Unavailable(_) => None,
        }
    }

    pub fn reason(&self) -> Option<&Unavailable> {
        match self {
            Reading::Computed(_) => None,
            Reading::Unavailable(reason) => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reading<U> {
        match self {
            Reading::Computed(value) => Reading::Computed(f(value)),
            Reading::Unavailable(reason) => Reading::Unavailable(reason),
        }
    }
}

impl<T: Copy> Reading<T> {
    pub fn value(&self) -> Option<T> {
        self.computed().copied()
    }
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Unavailable::MissingInput { what } => write!(f, "missing input ({})", what),
            Unavailable::InsufficientData { needed, found } => write!(
                f,
                "insufficient data ({} aligned rows, need {})",
                found, needed
            ),
            Unavailable::Degenerate { cause } => write!(f, "degenerate data ({})", cause),
        }
    }
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Degeneracy::ZeroVariance => write!(f, "zero variance"),
            Degeneracy::NonPositiveDiagonal => write!(f, "non-positive covariance diagonal"),
            Degeneracy::SingularCovariance => write!(f, "singular covariance"),
            Degeneracy::NonPositiveSpan => write!(f, "non-positive calendar span"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computed_and_unavailable_accessors() {
        let ok: Reading<f64> = Reading::Computed(0.5);
        assert!(ok.is_computed());
        assert_eq!(ok.value(), Some(0.5));
        assert_eq!(ok.reason(), None);

        let missing: Reading<f64> = Reading::missing("treaties");
        assert_eq!(missing.value(), None);
        assert_eq!(
            missing.reason(),
            Some(&Unavailable::MissingInput {
                what: "treaties".to_string()
            })
        );
    }

    #[test]
    fn map_keeps_reason() {
        let r: Reading<f64> = Reading::insufficient(3, 1);
        let mapped = r.map(|v| v * 2.0);
        assert_eq!(mapped, Reading::insufficient(3, 1));
        assert_eq!(Reading::Computed(2.0).map(|v: f64| v * 2.0), Reading::Computed(4.0));
    }

    #[test]
    fn reasons_render_for_reports() {
        let r: Reading<f64> = Reading::degenerate(Degeneracy::SingularCovariance);
        assert_eq!(
            r.reason().unwrap().to_string(),
            "degenerate data (singular covariance)"
        );
        let r: Reading<f64> = Reading::insufficient(2, 1);
        assert_eq!(
            r.reason().unwrap().to_string(),
            "insufficient data (1 aligned rows, need 2)"
        );
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_string(&Reading::Computed(1.5)).unwrap();
        assert_eq!(json, r#"{"status":"computed","value":1.5}"#);
        let json = serde_json::to_string(&Reading::<f64>::insufficient(3, 2)).unwrap();
        assert_eq!(
            json,
            r#"{"status":"unavailable","value":{"kind":"insufficient_data","needed":3,"found":2}}"#
        );
    }
}
