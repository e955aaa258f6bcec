//! Delimited-text dataset loader
//!
//! Expects a header row, an optional identifier column, integer feature
//! columns and a -1/1 label column. Every malformed cell is a schema error.

use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use super::record::{Dataset, FeatureVector, Label, Record};
use crate::config::DatasetConfig;
use crate::error::{PhishError, Result};

/// Read and parse a dataset file
pub fn load_dataset<P: AsRef<Path>>(path: P, config: &DatasetConfig) -> Result<Dataset> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let dataset = parse_dataset(&content, config)?;

    let (legitimate, phishing) = dataset.class_counts();
    info!(
        "Loaded {} rows ({} phishing, {} legitimate) with {} features from {}",
        dataset.len(),
        phishing,
        legitimate,
        dataset.features().len(),
        path.display()
    );

    Ok(dataset)
}

/// Parse delimited text into a dataset
pub fn parse_dataset(content: &str, config: &DatasetConfig) -> Result<Dataset> {
    let delimiter = config.delimiter_char()?;
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| PhishError::Schema("dataset has no header row".to_string()))?;
    let columns: Vec<&str> = header.split(delimiter).map(str::trim).collect();

    let mut seen = HashSet::new();
    if let Some(duplicate) = columns.iter().find(|c| !seen.insert(**c)) {
        return Err(PhishError::Schema(format!("duplicate column '{}'", duplicate)));
    }

    let label_idx = column_index(&columns, &config.label_column)?;
    let id_idx = match &config.id_column {
        Some(name) => Some(column_index(&columns, name)?),
        None => None,
    };

    let feature_columns: Vec<(usize, String)> = columns
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != label_idx && Some(*i) != id_idx)
        .map(|(i, name)| (i, name.to_string()))
        .collect();

    let mut records = Vec::new();
    for (line_no, line) in lines {
        let cells: Vec<&str> = line.split(delimiter).map(str::trim).collect();
        if cells.len() != columns.len() {
            return Err(PhishError::Schema(format!(
                "line {}: expected {} cells, found {}",
                line_no,
                columns.len(),
                cells.len()
            )));
        }

        let code = parse_cell(cells[label_idx], line_no, &config.label_column)?;
        let label = Label::from_code(code).map_err(|_| {
            PhishError::Schema(format!(
                "line {}: label must be -1 or 1, got {}",
                line_no, code
            ))
        })?;

        let id = match (id_idx, &config.id_column) {
            (Some(idx), Some(name)) => Some(parse_cell(cells[idx], line_no, name)?),
            _ => None,
        };

        let mut values = FeatureVector::new();
        for (idx, name) in &feature_columns {
            values.insert(name.clone(), parse_cell(cells[*idx], line_no, name)?);
        }

        records.push(Record::new(id, values, label));
    }

    let features = feature_columns.into_iter().map(|(_, name)| name).collect();
    Dataset::new(features, records)
}

fn column_index(columns: &[&str], name: &str) -> Result<usize> {
    columns
        .iter()
        .position(|c| *c == name)
        .ok_or_else(|| PhishError::Schema(format!("missing column '{}'", name)))
}

fn parse_cell(cell: &str, line_no: usize, column: &str) -> Result<i64> {
    cell.parse::<i64>().map_err(|_| {
        PhishError::Schema(format!(
            "line {}: column '{}' has non-integer value '{}'",
            line_no, column, cell
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "index,having_IP_Address,SSLfinal_State,Result
1,-1,-1,-1
2,1,1,-1

3,1,-1,1
";

    #[test]
    fn test_parse_sample() {
        let dataset = parse_dataset(SAMPLE, &DatasetConfig::default()).unwrap();

        assert_eq!(dataset.features(), &["having_IP_Address", "SSLfinal_State"]);
        assert_eq!(dataset.len(), 3);

        let last = &dataset.records()[2];
        assert_eq!(last.id, Some(3));
        assert_eq!(last.get("having_IP_Address"), Some(1));
        assert_eq!(last.get("SSLfinal_State"), Some(-1));
        assert_eq!(last.label(), Label::Phishing);
        assert_eq!(last.get("Result"), None);
    }

    #[test]
    fn test_without_id_column() {
        let config = DatasetConfig {
            id_column: None,
            ..DatasetConfig::default()
        };
        let dataset = parse_dataset(SAMPLE, &config).unwrap();

        assert_eq!(dataset.features(), &["index", "having_IP_Address", "SSLfinal_State"]);
        assert_eq!(dataset.records()[0].id, None);
    }

    #[test]
    fn test_custom_delimiter() {
        let config = DatasetConfig {
            delimiter: ";".to_string(),
            ..DatasetConfig::default()
        };
        let dataset = parse_dataset("index;a;Result\n1;0;1\n", &config).unwrap();
        assert_eq!(dataset.records()[0].get("a"), Some(0));
    }

    #[test]
    fn test_missing_label_column() {
        let result = parse_dataset("index,a,b\n1,1,1\n", &DatasetConfig::default());
        assert!(matches!(result, Err(PhishError::Schema(msg)) if msg.contains("Result")));
    }

    #[test]
    fn test_missing_id_column() {
        let result = parse_dataset("a,Result\n1,1\n", &DatasetConfig::default());
        assert!(matches!(result, Err(PhishError::Schema(msg)) if msg.contains("index")));
    }

    #[test]
    fn test_duplicate_column() {
        let result = parse_dataset("index,a,a,Result\n1,1,-1,1\n", &DatasetConfig::default());
        assert!(matches!(
            result,
            Err(PhishError::Schema(msg)) if msg == "duplicate column 'a'"
        ));
    }

    #[test]
    fn test_duplicate_label_column() {
        let result = parse_dataset("index,a,Result,Result\n1,1,1,1\n", &DatasetConfig::default());
        assert!(matches!(result, Err(PhishError::Schema(_))));
    }

    #[test]
    fn test_non_integer_cell() {
        let result = parse_dataset("index,a,Result\n1,x,1\n", &DatasetConfig::default());
        assert!(matches!(result, Err(PhishError::Schema(msg)) if msg.contains("line 2")));
    }

    #[test]
    fn test_wrong_arity() {
        let result = parse_dataset("index,a,Result\n1,1\n", &DatasetConfig::default());
        assert!(matches!(result, Err(PhishError::Schema(_))));
    }

    #[test]
    fn test_bad_label() {
        let result = parse_dataset("index,a,Result\n1,1,0\n", &DatasetConfig::default());
        assert!(matches!(result, Err(PhishError::Schema(msg)) if msg.contains("-1 or 1")));
    }

    #[test]
    fn test_empty_input() {
        let result = parse_dataset("\n\n", &DatasetConfig::default());
        assert!(matches!(result, Err(PhishError::Schema(_))));
    }

    #[test]
    fn test_load_from_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), SAMPLE).unwrap();

        let dataset = load_dataset(file.path(), &DatasetConfig::default()).unwrap();
        assert_eq!(dataset.class_counts(), (2, 1));
    }
}
