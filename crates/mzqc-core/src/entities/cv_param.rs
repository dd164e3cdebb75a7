use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{Map, Value};

/// A controlled-vocabulary term reference with an optional value and unit.
///
/// This is the shared base shape: [`AnalysisSoftware`] composes it with
/// additional required fields, [`QualityMetric`] wraps it unchanged and is
/// distinguished only by the list it occupies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CvParameter {
    /// Term identifier, `PREFIX:NNNNNNN`.
    pub accession: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<MetricValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl CvParameter {
    #[must_use]
    pub fn new(accession: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            accession: accession.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<MetricValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: Self) -> Self {
        self.unit = Some(Unit::Term(Box::new(unit)));
        self
    }

    /// The unit terms attached to this parameter, in declaration order.
    #[must_use]
    pub fn unit_terms(&self) -> Vec<&Self> {
        match &self.unit {
            None => Vec::new(),
            Some(Unit::Term(term)) => vec![term.as_ref()],
            Some(Unit::Terms(terms)) => terms.iter().collect(),
        }
    }
}

/// The value slot of a CV parameter: scalar, vector, matrix, or a table of
/// named columns. Held as raw JSON so that malformed tables survive decoding
/// and can be reported by semantic validation.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct MetricValue(pub Value);

impl MetricValue {
    /// The named columns, if the value is shaped as a mapping.
    #[must_use]
    pub const fn as_table(&self) -> Option<&Map<String, Value>> {
        match &self.0 {
            Value::Object(columns) => Some(columns),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_table(&self) -> bool {
        self.as_table().is_some()
    }

    #[must_use]
    pub const fn as_json(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for MetricValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<i32> for MetricValue {
    fn from(value: i32) -> Self {
        Self(Value::from(value))
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        Self(Value::from(value))
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self(Value::from(value))
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        Self(Value::from(value))
    }
}

/// Unit annotation: one term or a list of terms.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum Unit {
    Term(Box<CvParameter>),
    Terms(Vec<CvParameter>),
}

/// Software that produced the metrics of a run or set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct AnalysisSoftware {
    #[serde(flatten)]
    pub term: CvParameter,
    pub version: String,
    pub uri: String,
}

impl AnalysisSoftware {
    #[must_use]
    pub fn new(term: CvParameter, version: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            term,
            version: version.into(),
            uri: uri.into(),
        }
    }
}

/// A CV parameter used as a quality metric. Same shape as [`CvParameter`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct QualityMetric {
    pub term: CvParameter,
}

impl QualityMetric {
    #[must_use]
    pub const fn new(term: CvParameter) -> Self {
        Self { term }
    }

    #[must_use]
    pub fn accession(&self) -> &str {
        &self.term.accession
    }
}

impl From<CvParameter> for QualityMetric {
    fn from(term: CvParameter) -> Self {
        Self { term }
    }
}

impl AsRef<CvParameter> for CvParameter {
    fn as_ref(&self) -> &CvParameter {
        self
    }
}

impl AsRef<CvParameter> for AnalysisSoftware {
    fn as_ref(&self) -> &CvParameter {
        &self.term
    }
}

impl AsRef<CvParameter> for QualityMetric {
    fn as_ref(&self) -> &CvParameter {
        &self.term
    }
}

/// Borrowed view over the closed set of CV-parameter-shaped entities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CvTerm<'a> {
    Parameter(&'a CvParameter),
    Software(&'a AnalysisSoftware),
    Metric(&'a QualityMetric),
}

impl<'a> CvTerm<'a> {
    /// The shared base fields.
    #[must_use]
    pub const fn base(self) -> &'a CvParameter {
        match self {
            Self::Parameter(param) => param,
            Self::Software(software) => &software.term,
            Self::Metric(metric) => &metric.term,
        }
    }

    #[must_use]
    pub const fn variant_name(self) -> &'static str {
        match self {
            Self::Parameter(_) => "CvParameter",
            Self::Software(_) => "AnalysisSoftware",
            Self::Metric(_) => "QualityMetric",
        }
    }
}
