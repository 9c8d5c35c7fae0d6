use std::collections::HashSet;

use super::{Attribute, Column, Dataset, Float, Value};
use crate::error::{Error, Result};

/// Incremental construction of a [`Dataset`]
///
/// Attributes are declared first, then rows are added with one value per attribute in
/// declaration order. Statistics are computed once, when [`build`](DatasetBuilder::build) is
/// called after all rows are loaded.
#[derive(Debug, Clone)]
pub struct DatasetBuilder<F> {
    attributes: Vec<Attribute>,
    names: HashSet<String>,
    columns: Vec<Column<F>>,
    nsamples: usize,
}

impl<F: Float> Default for DatasetBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> DatasetBuilder<F> {
    pub fn new() -> Self {
        DatasetBuilder {
            attributes: Vec::new(),
            names: HashSet::new(),
            columns: Vec::new(),
            nsamples: 0,
        }
    }

    /// Declares the next attribute
    ///
    /// ### Errors
    ///
    /// * `DuplicateAttribute` if an attribute with the same name exists
    /// * `Parameters` if rows were already added
    pub fn add_attribute(&mut self, attribute: Attribute) -> Result<()> {
        if self.nsamples > 0 {
            return Err(Error::Parameters(format!(
                "attribute {} declared after {} rows were added",
                attribute.name(),
                self.nsamples
            )));
        }

        if !self.names.insert(attribute.name().to_string()) {
            return Err(Error::DuplicateAttribute(attribute.name().to_string()));
        }

        self.columns.push(Column::empty(attribute.kind()));
        self.attributes.push(attribute);

        Ok(())
    }

    /// Declares several attributes in order
    pub fn with_attributes<I: IntoIterator<Item = Attribute>>(mut self, attributes: I) -> Result<Self> {
        for attribute in attributes {
            self.add_attribute(attribute)?;
        }

        Ok(self)
    }

    /// Appends a row with one value per declared attribute
    ///
    /// The row is validated as a whole before any column is modified.
    ///
    /// ### Errors
    ///
    /// * `RowLength` if the number of values differs from the number of attributes
    /// * `ValueKind` if a value does not match the kind of its attribute
    /// * `NonFiniteValue` if a numeric value is NaN or infinite
    pub fn add_row(&mut self, row: Vec<Option<Value<F>>>) -> Result<()> {
        if row.len() != self.attributes.len() {
            return Err(Error::RowLength {
                expected: self.attributes.len(),
                got: row.len(),
            });
        }

        for (attribute, value) in self.attributes.iter().zip(row.iter()) {
            match value {
                Some(value) if value.kind() != attribute.kind() => {
                    return Err(Error::ValueKind(attribute.name().to_string()));
                }
                Some(Value::Numeric(value)) if !value.is_finite() => {
                    return Err(Error::NonFiniteValue(attribute.name().to_string()));
                }
                Some(Value::Discrete(value)) => {
                    if let Some(domain) = attribute.declared_domain() {
                        if !domain.contains(value) {
                            log::trace!(
                                "value {} of attribute {} is not in its declared domain",
                                value,
                                attribute.name()
                            );
                        }
                    }
                }
                _ => {}
            }
        }

        for (column, value) in self.columns.iter_mut().zip(row.into_iter()) {
            column.push(value);
        }
        self.nsamples += 1;

        Ok(())
    }

    /// Number of rows added so far
    pub fn nsamples(&self) -> usize {
        self.nsamples
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Computes the statistics and returns the immutable dataset
    pub fn build(self) -> Dataset<F> {
        log::debug!(
            "building dataset with {} attributes and {} instances",
            self.attributes.len(),
            self.nsamples
        );

        debug_assert!(self.columns.iter().all(|c| c.len() == self.nsamples));

        Dataset::from_columns(self.attributes, self.columns, None, self.nsamples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> DatasetBuilder<f64> {
        DatasetBuilder::new()
            .with_attributes(vec![
                Attribute::numeric("area"),
                Attribute::discrete("size", vec!["small", "large"]),
            ])
            .unwrap()
    }

    #[test]
    fn rejects_rows_of_wrong_length() {
        let mut builder = builder();

        assert_eq!(
            builder.add_row(vec![Some(Value::numeric(1.0))]),
            Err(Error::RowLength {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(builder.nsamples(), 0);
    }

    #[test]
    fn rejects_values_of_wrong_kind() {
        let mut builder = builder();

        assert_eq!(
            builder.add_row(vec![Some("big".into()), Some("small".into())]),
            Err(Error::ValueKind("area".into()))
        );
        assert_eq!(builder.nsamples(), 0);
    }

    #[test]
    fn rejects_non_finite_numbers() {
        let mut builder = builder();

        for value in &[f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                builder.add_row(vec![Some(Value::numeric(*value)), Some("small".into())]),
                Err(Error::NonFiniteValue("area".into()))
            );
        }
        assert_eq!(builder.nsamples(), 0);

        builder
            .add_row(vec![Some(Value::numeric(f64::MAX)), Some("small".into())])
            .unwrap();
        let dataset = builder.build();
        assert_eq!(dataset.numeric_stats("area").unwrap().max, f64::MAX);
    }

    #[test]
    fn rejects_duplicate_attributes() {
        let mut builder = builder();

        assert_eq!(
            builder.add_attribute(Attribute::numeric("area")),
            Err(Error::DuplicateAttribute("area".into()))
        );
    }

    #[test]
    fn rejects_attributes_after_rows() {
        let mut builder = builder();
        builder
            .add_row(vec![Some(Value::numeric(1.0)), None])
            .unwrap();

        assert!(builder.add_attribute(Attribute::numeric("depth")).is_err());
    }

    #[test]
    fn keeps_values_outside_declared_domain() {
        let mut builder = builder();
        builder
            .add_row(vec![None, Some("medium".into())])
            .unwrap();

        let dataset = builder.build();
        assert_eq!(dataset.targets("size").unwrap()[0].as_deref(), Some("medium"));
        assert_eq!(dataset.domain("size").unwrap().len(), 2);
    }
}
