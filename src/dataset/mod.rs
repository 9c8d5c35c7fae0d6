//! Datasets
//!
//! This module implements the dataset struct shared by all learners. A dataset is a set of named
//! attribute columns which are aligned by instance index. Each attribute is either numeric, with
//! values parsed to floating points, or discrete, with values drawn from an enumerated domain.
//! Missing cells are stored as `None`.
use num_traits::{FromPrimitive, NumAssignOps, NumCast, Signed};

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::iter::Sum;

use ndarray::ScalarOperand;

use crate::error::{Error, Result};

mod builder;
mod impl_dataset;
mod impl_labels;
mod instance;
mod iter;

pub use builder::DatasetBuilder;
pub use impl_labels::LabelCounts;
pub use instance::Instance;
pub use iter::Instances;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. They are used for numeric attributes and
/// for every derived statistic or probability of a trained model.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Signed
    + Sum
    + NumAssignOps
    + ScalarOperand
    + approx::AbsDiffEq
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// The declared kind of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Values are floating points
    Numeric,
    /// Values are strings drawn from a finite domain
    Discrete,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AttributeKind::Numeric => write!(f, "numeric"),
            AttributeKind::Discrete => write!(f, "discrete"),
        }
    }
}

/// Declaration of a single attribute
///
/// A discrete attribute either carries an explicitly declared domain or leaves it open, in
/// which case the domain is inferred from the observed values once the dataset is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
    domain: Option<Vec<String>>,
}

impl Attribute {
    /// Declare a numeric attribute
    pub fn numeric<S: Into<String>>(name: S) -> Self {
        Attribute {
            name: name.into(),
            kind: AttributeKind::Numeric,
            domain: None,
        }
    }

    /// Declare a discrete attribute with an explicit domain
    ///
    /// Duplicated values are dropped, the first occurrence defines the position in the domain.
    pub fn discrete<S, I, V>(name: S, domain: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut seen = HashSet::new();
        let domain = domain
            .into_iter()
            .map(Into::into)
            .filter(|value| seen.insert(value.clone()))
            .collect();

        Attribute {
            name: name.into(),
            kind: AttributeKind::Discrete,
            domain: Some(domain),
        }
    }

    /// Declare a discrete attribute whose domain is inferred from the data
    pub fn discrete_inferred<S: Into<String>>(name: S) -> Self {
        Attribute {
            name: name.into(),
            kind: AttributeKind::Discrete,
            domain: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == AttributeKind::Numeric
    }

    /// Returns the declared domain, `None` for numeric attributes and inferred domains
    pub fn declared_domain(&self) -> Option<&[String]> {
        self.domain.as_deref()
    }
}

/// A single raw value
///
/// Missing values are not a variant of their own, they are expressed by the absence of a value
/// (`Option::None` in columns and rows, an absent key in an [`Instance`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Value<F> {
    Numeric(F),
    Discrete(String),
}

impl<F: Float> Value<F> {
    pub fn numeric(value: F) -> Self {
        Value::Numeric(value)
    }

    pub fn discrete<S: Into<String>>(value: S) -> Self {
        Value::Discrete(value.into())
    }

    pub fn kind(&self) -> AttributeKind {
        match self {
            Value::Numeric(_) => AttributeKind::Numeric,
            Value::Discrete(_) => AttributeKind::Discrete,
        }
    }

    pub fn as_numeric(&self) -> Option<F> {
        match self {
            Value::Numeric(x) => Some(*x),
            Value::Discrete(_) => None,
        }
    }

    pub fn as_discrete(&self) -> Option<&str> {
        match self {
            Value::Numeric(_) => None,
            Value::Discrete(x) => Some(x),
        }
    }

    /// Returns the value as an opaque category
    ///
    /// Numeric values are rendered with their `Display` implementation.
    pub fn category(&self) -> Cow<'_, str> {
        match self {
            Value::Numeric(x) => Cow::Owned(x.to_string()),
            Value::Discrete(x) => Cow::Borrowed(x),
        }
    }
}

impl<F> From<String> for Value<F> {
    fn from(value: String) -> Self {
        Value::Discrete(value)
    }
}

impl<F> From<&str> for Value<F> {
    fn from(value: &str) -> Self {
        Value::Discrete(value.to_string())
    }
}

impl<F: Float> fmt::Display for Value<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Numeric(x) => write!(f, "{}", x),
            Value::Discrete(x) => write!(f, "{}", x),
        }
    }
}

/// Values of a single attribute for every instance
#[derive(Debug, Clone, PartialEq)]
pub enum Column<F> {
    Numeric(Vec<Option<F>>),
    Discrete(Vec<Option<String>>),
}

impl<F: Float> Column<F> {
    fn empty(kind: AttributeKind) -> Self {
        match kind {
            AttributeKind::Numeric => Column::Numeric(Vec::new()),
            AttributeKind::Discrete => Column::Discrete(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(x) => x.len(),
            Column::Discrete(x) => x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> AttributeKind {
        match self {
            Column::Numeric(_) => AttributeKind::Numeric,
            Column::Discrete(_) => AttributeKind::Discrete,
        }
    }

    pub fn as_numeric(&self) -> Option<&[Option<F>]> {
        match self {
            Column::Numeric(x) => Some(x),
            Column::Discrete(_) => None,
        }
    }

    pub fn as_discrete(&self) -> Option<&[Option<String>]> {
        match self {
            Column::Numeric(_) => None,
            Column::Discrete(x) => Some(x),
        }
    }

    /// Returns the value of instance `idx`, `None` if the value is missing
    ///
    /// ### Panics
    ///
    /// If `idx` is out of bounds
    pub fn value(&self, idx: usize) -> Option<Value<F>> {
        match self {
            Column::Numeric(x) => x[idx].map(Value::Numeric),
            Column::Discrete(x) => x[idx].clone().map(Value::Discrete),
        }
    }

    /// Returns the value of instance `idx` as an opaque category
    ///
    /// ### Panics
    ///
    /// If `idx` is out of bounds
    pub fn category(&self, idx: usize) -> Option<Cow<'_, str>> {
        match self {
            Column::Numeric(x) => x[idx].map(|x| Cow::Owned(x.to_string())),
            Column::Discrete(x) => x[idx].as_deref().map(Cow::Borrowed),
        }
    }

    fn push(&mut self, value: Option<Value<F>>) {
        match (self, value) {
            (Column::Numeric(x), Some(Value::Numeric(v))) => x.push(Some(v)),
            (Column::Discrete(x), Some(Value::Discrete(v))) => x.push(Some(v)),
            (Column::Numeric(x), _) => x.push(None),
            (Column::Discrete(x), _) => x.push(None),
        }
    }

    fn select(&self, indices: &[usize]) -> Self {
        match self {
            Column::Numeric(x) => Column::Numeric(indices.iter().map(|i| x[*i]).collect()),
            Column::Discrete(x) => {
                Column::Discrete(indices.iter().map(|i| x[*i].clone()).collect())
            }
        }
    }
}

/// Minimum and maximum of the non-missing values of a numeric attribute
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericStats<F> {
    pub min: F,
    pub max: F,
}

impl<F: Float> NumericStats<F> {
    /// Computes the statistics of a column, `None` if every value is missing
    pub fn from_values(values: &[Option<F>]) -> Option<Self> {
        values.iter().flatten().fold(None, |acc, &x| match acc {
            None => Some(NumericStats { min: x, max: x }),
            Some(stats) => Some(NumericStats {
                min: if x < stats.min { x } else { stats.min },
                max: if x > stats.max { x } else { stats.max },
            }),
        })
    }

    pub fn range(&self) -> F {
        self.max - self.min
    }
}

/// Dataset
///
/// This is the fundamental structure shared by all learners. It holds the attribute declarations
/// in declaration order, one column per attribute and the derived statistics: minimum and maximum
/// for numeric attributes and the value domain for discrete attributes.
///
/// A dataset is assembled with a [`DatasetBuilder`] and immutable afterwards. Which attribute is
/// the target is not part of the dataset, every learner receives the target name with its
/// hyperparameters.
///
/// ### Example
///
/// ```rust
/// use tabula::dataset::{Attribute, DatasetBuilder, Value};
///
/// let mut builder = DatasetBuilder::<f64>::new();
/// builder.add_attribute(Attribute::numeric("depth"))?;
/// builder.add_attribute(Attribute::discrete("type", vec!["deep", "shallow"]))?;
/// builder.add_row(vec![Some(Value::numeric(12.5)), Some("deep".into())])?;
/// builder.add_row(vec![None, Some("shallow".into())])?;
///
/// let dataset = builder.build();
/// assert_eq!(dataset.nsamples(), 2);
/// assert_eq!(dataset.numeric_stats("depth").unwrap().max, 12.5);
/// # tabula::error::Result::Ok(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<F> {
    attributes: Vec<Attribute>,
    index: HashMap<String, usize>,
    columns: Vec<Column<F>>,
    numeric_stats: Vec<Option<NumericStats<F>>>,
    domains: Vec<Option<Vec<String>>>,
    nsamples: usize,
}

impl<F: Float> Dataset<F> {
    /// Assembles a dataset from aligned columns and computes the statistics
    ///
    /// Inferred domains are taken from `domains` if given, otherwise from the observed values.
    fn from_columns(
        attributes: Vec<Attribute>,
        columns: Vec<Column<F>>,
        domains: Option<Vec<Option<Vec<String>>>>,
        nsamples: usize,
    ) -> Self {
        let index = attributes
            .iter()
            .enumerate()
            .map(|(idx, attr)| (attr.name.clone(), idx))
            .collect();

        let numeric_stats = columns
            .iter()
            .map(|column| column.as_numeric().and_then(NumericStats::from_values))
            .collect();

        let domains = domains.unwrap_or_else(|| {
            attributes
                .iter()
                .zip(columns.iter())
                .map(|(attr, column)| match (attr.kind, column) {
                    (AttributeKind::Numeric, _) => None,
                    (AttributeKind::Discrete, column) => Some(
                        attr.domain
                            .clone()
                            .unwrap_or_else(|| observed_domain(column)),
                    ),
                })
                .collect()
        });

        Dataset {
            attributes,
            index,
            columns,
            numeric_stats,
            domains,
            nsamples,
        }
    }

    /// Number of instances
    pub fn nsamples(&self) -> usize {
        self.nsamples
    }

    /// Number of attributes, including any attribute later used as target
    pub fn nattributes(&self) -> usize {
        self.attributes.len()
    }

    /// Attribute declarations in declaration order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.index.get(name).map(|idx| &self.attributes[*idx])
    }

    /// Returns the position of an attribute in declaration order
    pub fn attribute_index(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownAttribute(name.to_string()))
    }

    /// Iterates over the attribute names in declaration order
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|attr| attr.name())
    }

    /// Returns the column of the attribute at position `idx`
    ///
    /// ### Panics
    ///
    /// If `idx` is out of bounds
    pub fn column(&self, idx: usize) -> &Column<F> {
        &self.columns[idx]
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column<F>> {
        self.index.get(name).map(|idx| &self.columns[*idx])
    }

    /// Minimum and maximum of a numeric attribute
    ///
    /// Returns `None` for unknown or discrete attributes and for numeric attributes without a
    /// single non-missing value.
    pub fn numeric_stats(&self, name: &str) -> Option<&NumericStats<F>> {
        self.index
            .get(name)
            .and_then(|idx| self.numeric_stats_at(*idx))
    }

    pub fn numeric_stats_at(&self, idx: usize) -> Option<&NumericStats<F>> {
        self.numeric_stats.get(idx).and_then(|x| x.as_ref())
    }

    /// Domain of a discrete attribute, either declared or inferred from the observed values
    pub fn domain(&self, name: &str) -> Option<&[String]> {
        self.index.get(name).and_then(|idx| self.domain_at(*idx))
    }

    pub fn domain_at(&self, idx: usize) -> Option<&[String]> {
        self.domains.get(idx).and_then(|x| x.as_deref())
    }

    /// Returns the values of a discrete target attribute
    ///
    /// Fails if the attribute is unknown or numeric.
    pub fn targets(&self, target: &str) -> Result<&[Option<String>]> {
        let idx = self.attribute_index(target)?;

        self.columns[idx]
            .as_discrete()
            .ok_or_else(|| Error::NumericAttribute(target.to_string()))
    }

    /// Positions of all attributes except `target`, in declaration order
    pub fn feature_indices(&self, target: &str) -> Vec<usize> {
        self.attributes
            .iter()
            .enumerate()
            .filter(|(_, attr)| attr.name != target)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Materializes the instance at position `idx`, missing values are left out
    ///
    /// ### Panics
    ///
    /// If `idx` is out of bounds
    pub fn instance(&self, idx: usize) -> Instance<F> {
        self.attributes
            .iter()
            .zip(self.columns.iter())
            .filter_map(|(attr, column)| column.value(idx).map(|v| (attr.name.clone(), v)))
            .collect()
    }

    /// Iterates over all instances
    pub fn instances(&self) -> Instances<'_, F> {
        Instances::new(self)
    }
}

/// Observed non-missing values of a column in first-seen order
fn observed_domain<F: Float>(column: &Column<F>) -> Vec<String> {
    let mut seen = HashSet::new();

    (0..column.len())
        .filter_map(|idx| column.category(idx))
        .filter(|value| seen.insert(value.to_string()))
        .map(|value| value.into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn lakes() -> Result<Dataset<f64>> {
        let mut builder = DatasetBuilder::new();
        builder.add_attribute(Attribute::numeric("depth"))?;
        builder.add_attribute(Attribute::discrete("clarity", vec!["clear", "murky", "clear"]))?;
        builder.add_attribute(Attribute::discrete_inferred("type"))?;

        builder.add_row(vec![
            Some(Value::numeric(3.5)),
            Some("clear".into()),
            Some("oligotrophic".into()),
        ])?;
        builder.add_row(vec![None, Some("murky".into()), Some("eutrophic".into())])?;
        builder.add_row(vec![
            Some(Value::numeric(-1.0)),
            None,
            Some("oligotrophic".into()),
        ])?;
        builder.add_row(vec![Some(Value::numeric(10.0)), Some("murky".into()), None])?;

        Ok(builder.build())
    }

    #[test]
    fn numeric_stats_skip_missing_values() -> Result<()> {
        let dataset = lakes()?;
        let stats = dataset.numeric_stats("depth").unwrap();

        assert_abs_diff_eq!(stats.min, -1.0);
        assert_abs_diff_eq!(stats.max, 10.0);
        assert_abs_diff_eq!(stats.range(), 11.0);
        assert!(dataset.numeric_stats("type").is_none());

        Ok(())
    }

    #[test]
    fn all_missing_numeric_column_has_no_stats() {
        assert_eq!(NumericStats::<f64>::from_values(&[None, None]), None);
    }

    #[test]
    fn declared_domain_keeps_declaration_order() -> Result<()> {
        let dataset = lakes()?;

        assert_eq!(
            dataset.domain("clarity").unwrap(),
            &["clear".to_string(), "murky".to_string()]
        );

        Ok(())
    }

    #[test]
    fn undeclared_domain_is_inferred_in_first_seen_order() -> Result<()> {
        let dataset = lakes()?;

        assert_eq!(
            dataset.domain("type").unwrap(),
            &["oligotrophic".to_string(), "eutrophic".to_string()]
        );
        assert!(dataset.domain("depth").is_none());

        Ok(())
    }

    #[test]
    fn targets_must_be_discrete() -> Result<()> {
        let dataset = lakes()?;

        assert_eq!(dataset.targets("type")?.len(), 4);
        assert_eq!(
            dataset.targets("depth"),
            Err(Error::NumericAttribute("depth".into()))
        );
        assert_eq!(
            dataset.targets("colour"),
            Err(Error::UnknownAttribute("colour".into()))
        );

        Ok(())
    }

    #[test]
    fn instances_leave_out_missing_values() -> Result<()> {
        let dataset = lakes()?;

        let instance = dataset.instance(1);
        assert_eq!(instance.len(), 2);
        assert_eq!(instance.numeric("depth"), None);
        assert_eq!(instance.discrete("clarity"), Some("murky"));

        assert_eq!(dataset.instances().count(), dataset.nsamples());

        Ok(())
    }

    #[test]
    fn feature_indices_skip_target() -> Result<()> {
        let dataset = lakes()?;

        assert_eq!(dataset.feature_indices("clarity"), vec![0, 2]);
        assert_eq!(dataset.attribute_index("type")?, 2);

        Ok(())
    }

    #[test]
    fn numeric_values_render_as_categories() {
        let value = Value::numeric(2.5f64);

        assert_eq!(value.category(), "2.5");
        assert_eq!(Value::<f64>::from("x").category(), "x");
        assert_eq!(value.kind(), AttributeKind::Numeric);
    }
}
