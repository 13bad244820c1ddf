//! Validated probability distributions for stage costs, durations and revenue.
//!
//! A [`Distribution`] is built once, checked eagerly, and carries a ready
//! sampler so that drawing from it can never fail. Moments come from the
//! closed-form expressions of each family, never from sampling.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::distr::Uniform;
use rand_distr::{Beta, Distribution as _, LogNormal, Normal, Triangular};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// The five supported distribution families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionKind {
    Triangular,
    Normal,
    LogNormal,
    Uniform,
    Beta,
}

impl DistributionKind {
    pub const ALL: [DistributionKind; 5] = [
        DistributionKind::Triangular,
        DistributionKind::Normal,
        DistributionKind::LogNormal,
        DistributionKind::Uniform,
        DistributionKind::Beta,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionKind::Triangular => "triangular",
            DistributionKind::Normal => "normal",
            DistributionKind::LogNormal => "lognormal",
            DistributionKind::Uniform => "uniform",
            DistributionKind::Beta => "beta",
        }
    }

    /// Parameter names the dictionary form must carry, in positional order
    #[must_use]
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            DistributionKind::Triangular => &["low", "mode", "high"],
            DistributionKind::Normal => &["mean", "std"],
            DistributionKind::LogNormal => &["mean", "sigma"],
            DistributionKind::Uniform => &["low", "high"],
            DistributionKind::Beta => &["alpha", "beta"],
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistributionKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        DistributionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| SimError::UnsupportedKind(s.to_string()))
    }
}

/// Raw parameters of a distribution, one variant per family.
///
/// For `LogNormal`, `mean` and `sigma` describe the underlying normal, not
/// the lognormal variable itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistributionParams {
    Triangular { low: f64, mode: f64, high: f64 },
    Normal { mean: f64, std: f64 },
    LogNormal { mean: f64, sigma: f64 },
    Uniform { low: f64, high: f64 },
    Beta { alpha: f64, beta: f64 },
}

impl DistributionParams {
    #[must_use]
    pub fn kind(&self) -> DistributionKind {
        match self {
            DistributionParams::Triangular { .. } => DistributionKind::Triangular,
            DistributionParams::Normal { .. } => DistributionKind::Normal,
            DistributionParams::LogNormal { .. } => DistributionKind::LogNormal,
            DistributionParams::Uniform { .. } => DistributionKind::Uniform,
            DistributionParams::Beta { .. } => DistributionKind::Beta,
        }
    }

    fn values(&self) -> Vec<f64> {
        match *self {
            DistributionParams::Triangular { low, mode, high } => vec![low, mode, high],
            DistributionParams::Normal { mean, std } => vec![mean, std],
            DistributionParams::LogNormal { mean, sigma } => vec![mean, sigma],
            DistributionParams::Uniform { low, high } => vec![low, high],
            DistributionParams::Beta { alpha, beta } => vec![alpha, beta],
        }
    }

    fn validate(&self) -> Result<()> {
        let kind = self.kind();
        for (key, value) in kind.required_keys().iter().zip(self.values()) {
            if !value.is_finite() {
                return Err(SimError::invalid_parameter(
                    format!("{kind}.{key}"),
                    format!("must be finite, got {value}"),
                ));
            }
        }

        match *self {
            DistributionParams::Triangular { low, mode, high } => {
                if !(low <= mode && mode <= high) {
                    return Err(SimError::invalid_parameter(
                        "triangular",
                        format!("requires low <= mode <= high, got {low}, {mode}, {high}"),
                    ));
                }
            }
            DistributionParams::Normal { std, .. } => {
                if std <= 0.0 {
                    return Err(SimError::invalid_parameter(
                        "normal.std",
                        format!("must be positive, got {std}"),
                    ));
                }
            }
            DistributionParams::LogNormal { sigma, .. } => {
                if sigma <= 0.0 {
                    return Err(SimError::invalid_parameter(
                        "lognormal.sigma",
                        format!("must be positive, got {sigma}"),
                    ));
                }
            }
            DistributionParams::Uniform { low, high } => {
                if low >= high {
                    return Err(SimError::invalid_parameter(
                        "uniform",
                        format!("requires low < high, got {low}, {high}"),
                    ));
                }
            }
            DistributionParams::Beta { alpha, beta } => {
                if alpha <= 0.0 || beta <= 0.0 {
                    return Err(SimError::invalid_parameter(
                        "beta",
                        format!("alpha and beta must be positive, got {alpha}, {beta}"),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Pre-built generator for a validated parameter set
#[derive(Debug, Clone)]
enum Sampler {
    /// Triangular with zero width
    Constant(f64),
    Triangular(Triangular<f64>),
    Normal(Normal<f64>),
    LogNormal(LogNormal<f64>),
    Uniform(Uniform<f64>),
    Beta(Beta<f64>),
}

impl Sampler {
    fn build(params: &DistributionParams) -> Result<Self> {
        let kind = params.kind();
        let rejected =
            |e: &dyn fmt::Display| SimError::invalid_parameter(kind.as_str(), e.to_string());

        let sampler = match *params {
            DistributionParams::Triangular { low, high, .. } if low == high => {
                Sampler::Constant(low)
            }
            DistributionParams::Triangular { low, mode, high } => Sampler::Triangular(
                Triangular::new(low, high, mode).map_err(|e| rejected(&e))?,
            ),
            DistributionParams::Normal { mean, std } => {
                Sampler::Normal(Normal::new(mean, std).map_err(|e| rejected(&e))?)
            }
            DistributionParams::LogNormal { mean, sigma } => {
                Sampler::LogNormal(LogNormal::new(mean, sigma).map_err(|e| rejected(&e))?)
            }
            DistributionParams::Uniform { low, high } => {
                Sampler::Uniform(Uniform::new(low, high).map_err(|e| rejected(&e))?)
            }
            DistributionParams::Beta { alpha, beta } => {
                Sampler::Beta(Beta::new(alpha, beta).map_err(|e| rejected(&e))?)
            }
        };
        Ok(sampler)
    }

    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Sampler::Constant(value) => *value,
            Sampler::Triangular(d) => d.sample(rng),
            Sampler::Normal(d) => d.sample(rng),
            Sampler::LogNormal(d) => d.sample(rng),
            Sampler::Uniform(d) => d.sample(rng),
            Sampler::Beta(d) => d.sample(rng),
        }
    }
}

/// Dictionary form of a distribution: a family name plus named parameters.
///
/// This is the shape used in parameter files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSpec {
    pub kind: String,
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

/// An immutable, validated probability distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DistributionSpec", into = "DistributionSpec")]
pub struct Distribution {
    params: DistributionParams,
    sampler: Sampler,
}

impl Distribution {
    /// Validate `params` and prepare a sampler for them.
    pub fn new(params: DistributionParams) -> Result<Self> {
        params.validate()?;
        let sampler = Sampler::build(&params)?;
        Ok(Self { params, sampler })
    }

    pub fn triangular(low: f64, mode: f64, high: f64) -> Result<Self> {
        Self::new(DistributionParams::Triangular { low, mode, high })
    }

    pub fn normal(mean: f64, std: f64) -> Result<Self> {
        Self::new(DistributionParams::Normal { mean, std })
    }

    /// `mean` and `sigma` are the parameters of the underlying normal.
    pub fn lognormal(mean: f64, sigma: f64) -> Result<Self> {
        Self::new(DistributionParams::LogNormal { mean, sigma })
    }

    pub fn uniform(low: f64, high: f64) -> Result<Self> {
        Self::new(DistributionParams::Uniform { low, high })
    }

    pub fn beta(alpha: f64, beta: f64) -> Result<Self> {
        Self::new(DistributionParams::Beta { alpha, beta })
    }

    /// Build from the dictionary form.
    ///
    /// The mapping must hold exactly the keys required by `kind`.
    pub fn from_spec(kind: &str, params: &BTreeMap<String, f64>) -> Result<Self> {
        let kind: DistributionKind = kind.parse()?;
        let required = kind.required_keys();

        if let Some(extra) = params.keys().find(|k| !required.contains(&k.as_str())) {
            return Err(SimError::invalid_parameter(
                format!("{kind}.{extra}"),
                format!("unexpected key, expected exactly {required:?}"),
            ));
        }

        let mut values = Vec::with_capacity(required.len());
        for key in required {
            let value = params.get(*key).ok_or_else(|| {
                SimError::invalid_parameter(format!("{kind}.{key}"), "missing required key")
            })?;
            values.push(*value);
        }

        let params = match kind {
            DistributionKind::Triangular => DistributionParams::Triangular {
                low: values[0],
                mode: values[1],
                high: values[2],
            },
            DistributionKind::Normal => DistributionParams::Normal {
                mean: values[0],
                std: values[1],
            },
            DistributionKind::LogNormal => DistributionParams::LogNormal {
                mean: values[0],
                sigma: values[1],
            },
            DistributionKind::Uniform => DistributionParams::Uniform {
                low: values[0],
                high: values[1],
            },
            DistributionKind::Beta => DistributionParams::Beta {
                alpha: values[0],
                beta: values[1],
            },
        };
        Self::new(params)
    }

    #[must_use]
    pub fn kind(&self) -> DistributionKind {
        self.params.kind()
    }

    #[must_use]
    pub fn params(&self) -> &DistributionParams {
        &self.params
    }

    /// Draw one value. Stateless apart from the generator it is handed.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sampler.sample(rng)
    }

    /// Analytic mean
    #[must_use]
    pub fn mean(&self) -> f64 {
        match self.params {
            DistributionParams::Triangular { low, mode, high } => (low + mode + high) / 3.0,
            DistributionParams::Normal { mean, .. } => mean,
            DistributionParams::LogNormal { mean, sigma } => (mean + sigma * sigma / 2.0).exp(),
            DistributionParams::Uniform { low, high } => (low + high) / 2.0,
            DistributionParams::Beta { alpha, beta } => alpha / (alpha + beta),
        }
    }

    /// Analytic standard deviation
    #[must_use]
    pub fn std(&self) -> f64 {
        match self.params {
            DistributionParams::Triangular { low, mode, high } => {
                let variance = (low * low + mode * mode + high * high
                    - low * mode
                    - low * high
                    - mode * high)
                    / 18.0;
                variance.sqrt()
            }
            DistributionParams::Normal { std, .. } => std,
            DistributionParams::LogNormal { mean, sigma } => {
                let s2 = sigma * sigma;
                ((s2.exp() - 1.0) * (2.0 * mean + s2).exp()).sqrt()
            }
            DistributionParams::Uniform { low, high } => (high - low) / 12f64.sqrt(),
            DistributionParams::Beta { alpha, beta } => {
                let total = alpha + beta;
                (alpha * beta / (total * total * (total + 1.0))).sqrt()
            }
        }
    }
}

impl PartialEq for Distribution {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
    }
}

impl rand_distr::Distribution<f64> for Distribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sampler.sample(rng)
    }
}

impl TryFrom<DistributionSpec> for Distribution {
    type Error = SimError;

    fn try_from(spec: DistributionSpec) -> Result<Self> {
        Distribution::from_spec(&spec.kind, &spec.params)
    }
}

impl From<Distribution> for DistributionSpec {
    fn from(dist: Distribution) -> Self {
        let kind = dist.kind();
        let params = kind
            .required_keys()
            .iter()
            .map(|k| (*k).to_string())
            .zip(dist.params.values())
            .collect();
        DistributionSpec {
            kind: kind.as_str().to_string(),
            params,
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        write!(f, "{kind}(")?;
        for (i, (key, value)) in kind
            .required_keys()
            .iter()
            .zip(self.params.values())
            .enumerate()
        {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str(")")
    }
}
