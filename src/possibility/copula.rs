use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize
};

use crate::possibilityerror::PossibilityError;

/// Independence copula for two arguments: `1 − (1 − min(π1, π2))²`.
pub fn copula_independence(pi1: f64, pi2: f64) -> f64 {
    let min_val = pi1.min(pi2);
    1.0 - (1.0 - min_val).powi(2)
}

/// Unknown-dependence copula for two arguments: `min(1, 2·min(π1, π2))`.
pub fn copula_unknown(pi1: f64, pi2: f64) -> f64 {
    (2.0 * pi1.min(pi2)).min(1.0)
}

/// Rule merging two marginal possibility degrees into a joint degree.
///
/// Both rules satisfy `combine(1, 1) = 1`, `combine(0, 0) = 0` and are
/// non-decreasing in each argument. `Unknown` dominates `Independence`
/// pointwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Copula {
    #[default]
    Independence,
    Unknown
}

impl Copula {
    pub fn combine(&self, pi1: f64, pi2: f64) -> f64 {
        match self {
            Copula::Independence => copula_independence(pi1, pi2),
            Copula::Unknown => copula_unknown(pi1, pi2),
        }
    }

    pub fn combinator(&self) -> fn(f64, f64) -> f64 {
        match self {
            Copula::Independence => copula_independence,
            Copula::Unknown => copula_unknown,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Copula::Independence => "independence",
            Copula::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Copula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for Copula {
    type Err = PossibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "independence" => Ok(Copula::Independence),
            "unknown" => Ok(Copula::Unknown),
            other => Err(PossibilityError::UnknownCopula(other.to_owned())),
        }
    }
}

impl TryFrom<String> for Copula {
    type Error = PossibilityError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

impl From<Copula> for String {
    fn from(copula: Copula) -> Self {
        copula.token().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(copula_independence(1.0, 1.0), 1.0);
        assert_eq!(copula_independence(0.0, 0.0), 0.0);
        assert_eq!(copula_unknown(1.0, 1.0), 1.0);
        assert_eq!(copula_unknown(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_values() {
        assert!((copula_independence(0.5, 0.9) - 0.75).abs() < 1e-12);
        assert!((copula_unknown(0.3, 0.9) - 0.6).abs() < 1e-12);
        assert_eq!(copula_unknown(0.6, 0.9), 1.0);
        assert_eq!(Copula::Unknown.combine(0.2, 0.1), copula_unknown(0.2, 0.1));
        assert_eq!((Copula::Independence.combinator())(0.5, 0.5), 0.75);
    }

    #[test]
    fn test_parse() {
        assert_eq!("independence".parse::<Copula>().unwrap(), Copula::Independence);
        assert_eq!("unknown".parse::<Copula>().unwrap(), Copula::Unknown);
        let err = "gumbel".parse::<Copula>().unwrap_err();
        assert!(matches!(err, PossibilityError::UnknownCopula(ref t) if t == "gumbel"));
        assert_eq!(Copula::default(), Copula::Independence);
        assert_eq!(Copula::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_json() {
        let c: Copula = serde_json::from_str("\"unknown\"").unwrap();
        assert_eq!(c, Copula::Unknown);
        assert_eq!(serde_json::to_string(&Copula::Independence).unwrap(), "\"independence\"");
        assert!(serde_json::from_str::<Copula>("\"clayton\"").is_err());
    }
}
