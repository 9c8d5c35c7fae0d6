use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use tabula::dataset::{Attribute, DatasetBuilder, Value};
use tabula::{Dataset, Float};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArffError>;

#[derive(Error, Debug)]
pub enum ArffError {
    #[error("could not read ARFF source: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid data section: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed attribute declaration in line {line}: {content}")]
    Attribute { line: usize, content: String },
    #[error("no @data section found")]
    MissingData,
    #[error(transparent)]
    BaseCrate(#[from] tabula::Error),
}

/// Reads an ARFF file from disk
pub fn read_arff<F: Float, P: AsRef<Path>>(path: P) -> Result<Dataset<F>> {
    let file = File::open(path)?;

    from_reader(BufReader::new(file))
}

/// Reads an ARFF document from any byte source
pub fn from_reader<F: Float, R: Read>(mut reader: R) -> Result<Dataset<F>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    parse_arff(&text)
}

/// Parses an ARFF document
///
/// The header declares the attributes in order, `@data` starts the comma separated rows. Keywords
/// are case-insensitive and `%` comments out the rest of a line.
///
/// * `{a, b, c}` declares a discrete attribute with this domain
/// * `numeric`, `real` and `integer` declare a numeric attribute
/// * every other type is read as discrete with a domain inferred from the data
///
/// Rows with the wrong number of values are skipped. `?` marks a missing value, as does a numeric
/// value which cannot be parsed.
///
/// ```
/// use tabula_datasets::parse_arff;
///
/// let dataset = parse_arff::<f64>(
///     "@relation fish
///      @attribute length numeric
///      @attribute kind {cod, eel}
///      @data
///      42.5, cod
///      ?, eel",
/// )?;
///
/// assert_eq!(dataset.nsamples(), 2);
/// assert_eq!(dataset.domain("kind").unwrap(), &["cod", "eel"]);
/// # Ok::<(), tabula_datasets::ArffError>(())
/// ```
pub fn parse_arff<F: Float>(text: &str) -> Result<Dataset<F>> {
    let mut builder = DatasetBuilder::new();
    let mut lines = text.lines().enumerate();
    let mut has_data = false;

    for (idx, line) in lines.by_ref() {
        let line = strip_comment(line);

        if line.is_empty() {
            continue;
        } else if let Some(name) = keyword(line, "@relation") {
            debug!("reading relation {}", name);
        } else if let Some(declaration) = keyword(line, "@attribute") {
            let attribute = parse_attribute(declaration).ok_or_else(|| ArffError::Attribute {
                line: idx + 1,
                content: line.to_string(),
            })?;

            builder.add_attribute(attribute)?;
        } else if keyword(line, "@data").is_some() {
            has_data = true;
            break;
        } else {
            warn!("ignoring unknown header line {}: {}", idx + 1, line);
        }
    }

    if !has_data {
        return Err(ArffError::MissingData);
    }

    let mut rows = String::new();
    let mut line_numbers = Vec::new();
    for (idx, line) in lines {
        let line = strip_comment(line);
        if !line.is_empty() {
            rows.push_str(line);
            rows.push('\n');
            line_numbers.push(idx + 1);
        }
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quote(b'\'')
        .trim(Trim::All)
        .from_reader(rows.as_bytes());

    for (record, line) in reader.records().zip(line_numbers) {
        let record = record?;

        if record.len() != builder.attributes().len() {
            warn!(
                "skipping line {}: {} values for {} attributes",
                line,
                record.len(),
                builder.attributes().len()
            );
            continue;
        }

        let row = builder
            .attributes()
            .iter()
            .zip(record.iter())
            .map(|(attribute, value)| parse_value(attribute, value, line))
            .collect();

        builder.add_row(row)?;
    }

    Ok(builder.build())
}

fn strip_comment(line: &str) -> &str {
    match line.find('%') {
        Some(pos) => line[..pos].trim(),
        None => line.trim(),
    }
}

/// Returns the remainder of `line` if it starts with `keyword`, ignoring case
fn keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let head = line.get(..keyword.len())?;
    let rest = &line[keyword.len()..];

    if head.eq_ignore_ascii_case(keyword) && (rest.is_empty() || rest.starts_with(char::is_whitespace)) {
        Some(rest.trim())
    } else {
        None
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('\'')
        .and_then(|value| value.strip_suffix('\''))
        .unwrap_or(value)
}

fn parse_attribute(declaration: &str) -> Option<Attribute> {
    let (name, kind) = match declaration.strip_prefix('\'') {
        Some(quoted) => {
            let end = quoted.find('\'')?;
            (&quoted[..end], &quoted[end + 1..])
        }
        None => {
            let end = declaration.find(char::is_whitespace)?;
            (&declaration[..end], &declaration[end..])
        }
    };

    let kind = kind.trim();
    if name.is_empty() || kind.is_empty() {
        return None;
    }

    if let Some(values) = kind.strip_prefix('{') {
        let domain = values
            .strip_suffix('}')?
            .split(',')
            .map(|value| unquote(value.trim()))
            .filter(|value| !value.is_empty());

        return Some(Attribute::discrete(name, domain));
    }

    let type_name = kind.split_whitespace().next()?.to_ascii_lowercase();
    match type_name.as_str() {
        "numeric" | "real" | "integer" => Some(Attribute::numeric(name)),
        _ => Some(Attribute::discrete_inferred(name)),
    }
}

fn parse_value<F: Float>(attribute: &Attribute, value: &str, line: usize) -> Option<Value<F>> {
    if value == "?" || value.is_empty() {
        return None;
    }

    if !attribute.is_numeric() {
        return Some(Value::discrete(value));
    }

    match value.parse::<f64>() {
        Ok(x) if x.is_finite() => Some(Value::numeric(F::cast(x))),
        _ => {
            warn!(
                "line {}: could not parse {} as value of numeric attribute {}",
                line,
                value,
                attribute.name()
            );
            None
        }
    }
}
