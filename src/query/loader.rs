//! Query file loading
//!
//! A `--query` argument is either a search expression or a path to a YAML or
//! JSON file holding `queries: [{value, tag}]`.

use super::types::{Query, QuerySet};
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Format of a query file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryFormat {
    /// YAML (`.yaml` / `.yml`)
    Yaml,
    /// JSON (`.json`)
    Json,
}

impl QueryFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl QuerySet {
    /// Build a query set from a command-line argument
    pub fn from_arg(arg: &str) -> Result<Self> {
        let path = Path::new(arg);
        if QueryFormat::from_path(path).is_some() {
            return load_queries(path);
        }

        let mut set = Self::new();
        set.add_query(arg, None);
        Ok(set)
    }

    /// Append queries from a YAML file
    pub fn load_yaml(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let loaded = load_file(path.as_ref(), QueryFormat::Yaml)?;
        self.queries.extend(loaded.queries);
        Ok(())
    }

    /// Append queries from a JSON file
    pub fn load_json(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let loaded = load_file(path.as_ref(), QueryFormat::Json)?;
        self.queries.extend(loaded.queries);
        Ok(())
    }
}

/// Load a query file, picking the parser from its extension
pub fn load_queries(path: impl AsRef<Path>) -> Result<QuerySet> {
    let path = path.as_ref();
    let format = QueryFormat::from_path(path).ok_or_else(|| {
        Error::config(format!(
            "Query file '{}' must end in .yaml, .yml or .json",
            path.display()
        ))
    })?;
    load_file(path, format)
}

/// Parse query file contents
pub fn load_queries_from_str(content: &str, format: QueryFormat) -> Result<QuerySet> {
    let set: QuerySet = match format {
        QueryFormat::Yaml => serde_yaml::from_str(content)?,
        QueryFormat::Json => serde_json::from_str(content)?,
    };

    if let Some(blank) = set.queries.iter().position(|q: &Query| q.value.trim().is_empty()) {
        return Err(Error::invalid_value(
            format!("queries[{blank}].value"),
            "query value must not be empty",
        ));
    }

    Ok(set)
}

fn load_file(path: &Path, format: QueryFormat) -> Result<QuerySet> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read query file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;
    load_queries_from_str(&content, format)
}
