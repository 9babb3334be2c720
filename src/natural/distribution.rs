//! Distribution tags and conditioning values.
//!
//! [`Distribution`] is the dispatch key of the family registry. It carries no
//! parameters; dimensionality travels separately as `dims` and any fixed
//! auxiliary parameter as a [`Conditioner`].
use crate::natural::errors::NaturalError;
use ndarray::Array1;
use std::{fmt, str::FromStr};

/// Exponential-family distribution type.
///
/// The first group has a resolver in the default registry; `Wishart`,
/// `InverseWishart` and `VonMises` are known tags without one and must be
/// registered by the caller before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Distribution {
    Bernoulli,
    Beta,
    Binomial,
    Categorical,
    Chisq,
    Dirichlet,
    Exponential,
    Gamma,
    Geometric,
    Laplace,
    LogNormal,
    MvNormalMeanCovariance,
    MvNormalMeanPrecision,
    NormalMeanPrecision,
    NormalMeanVariance,
    Pareto,
    Poisson,
    Rayleigh,
    Weibull,
    // ---- Known tags without a default handler ----
    InverseWishart,
    VonMises,
    Wishart,
}

impl Distribution {
    /// Every tag, in declaration order.
    pub const ALL: [Distribution; 22] = [
        Distribution::Bernoulli,
        Distribution::Beta,
        Distribution::Binomial,
        Distribution::Categorical,
        Distribution::Chisq,
        Distribution::Dirichlet,
        Distribution::Exponential,
        Distribution::Gamma,
        Distribution::Geometric,
        Distribution::Laplace,
        Distribution::LogNormal,
        Distribution::MvNormalMeanCovariance,
        Distribution::MvNormalMeanPrecision,
        Distribution::NormalMeanPrecision,
        Distribution::NormalMeanVariance,
        Distribution::Pareto,
        Distribution::Poisson,
        Distribution::Rayleigh,
        Distribution::Weibull,
        Distribution::InverseWishart,
        Distribution::VonMises,
        Distribution::Wishart,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Distribution::Bernoulli => "Bernoulli",
            Distribution::Beta => "Beta",
            Distribution::Binomial => "Binomial",
            Distribution::Categorical => "Categorical",
            Distribution::Chisq => "Chisq",
            Distribution::Dirichlet => "Dirichlet",
            Distribution::Exponential => "Exponential",
            Distribution::Gamma => "Gamma",
            Distribution::Geometric => "Geometric",
            Distribution::Laplace => "Laplace",
            Distribution::LogNormal => "LogNormal",
            Distribution::MvNormalMeanCovariance => "MvNormalMeanCovariance",
            Distribution::MvNormalMeanPrecision => "MvNormalMeanPrecision",
            Distribution::NormalMeanPrecision => "NormalMeanPrecision",
            Distribution::NormalMeanVariance => "NormalMeanVariance",
            Distribution::Pareto => "Pareto",
            Distribution::Poisson => "Poisson",
            Distribution::Rayleigh => "Rayleigh",
            Distribution::Weibull => "Weibull",
            Distribution::InverseWishart => "InverseWishart",
            Distribution::VonMises => "VonMises",
            Distribution::Wishart => "Wishart",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Distribution {
    type Err = NaturalError;

    /// Parse a family name; matching ignores ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Distribution::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| NaturalError::UnknownDistribution { name: trimmed.to_string() })
    }
}

/// Optional distribution-specific auxiliary value held fixed during
/// optimization (e.g. the location of a Laplace or the shape of a Weibull).
///
/// Opaque to the registry: it is handed to resolvers and stored unchanged on
/// the resulting manifold.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Conditioner {
    #[default]
    None,
    Scalar(f64),
    Vector(Array1<f64>),
}

impl Conditioner {
    pub fn is_none(&self) -> bool {
        matches!(self, Conditioner::None)
    }
}

impl From<f64> for Conditioner {
    fn from(value: f64) -> Self {
        Conditioner::Scalar(value)
    }
}

impl From<Array1<f64>> for Conditioner {
    fn from(value: Array1<f64>) -> Self {
        Conditioner::Vector(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_agree() {
        for d in Distribution::ALL {
            assert_eq!(d.to_string().parse::<Distribution>().unwrap(), d);
        }
        assert_eq!("  gamma ".parse::<Distribution>().unwrap(), Distribution::Gamma);
        assert_eq!(
            "Cauchy".parse::<Distribution>(),
            Err(NaturalError::UnknownDistribution { name: "Cauchy".to_string() })
        );
    }

    #[test]
    fn conditioner_defaults_to_none() {
        assert!(Conditioner::default().is_none());
        assert_eq!(Conditioner::from(2.0), Conditioner::Scalar(2.0));
    }
}
