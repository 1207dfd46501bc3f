//! Model artifact loading
//!
//! Three artifacts are produced at training time and loaded once at startup:
//! the regression model, the fitted scaler and the ordered list of training
//! columns. All three are JSON documents.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;

pub const MODEL_FILE: &str = "model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const COLUMNS_FILE: &str = "training_columns.json";

/// Which artifact an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Model,
    Scaler,
    Schema,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Model => write!(f, "model"),
            ArtifactKind::Scaler => write!(f, "scaler"),
            ArtifactKind::Schema => write!(f, "training columns"),
        }
    }
}

/// Errors raised while loading or validating artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {kind} artifact '{}': {source}", path.display())]
    Io {
        kind: ArtifactKind,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {kind} artifact '{}': {source}", path.display())]
    Parse {
        kind: ArtifactKind,
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("training column list is empty")]
    EmptySchema,

    #[error("training column '{0}' appears more than once")]
    DuplicateColumn(String),

    #[error("{kind} expects {actual} features but the training columns define {expected}")]
    FeatureCountMismatch {
        kind: ArtifactKind,
        expected: usize,
        actual: usize,
    },

    #[error("scaler feature {position} is '{found}' but the training column there is '{expected}'")]
    FeatureNameMismatch {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("invalid {kind} artifact: {message}")]
    Invalid { kind: ArtifactKind, message: String },
}

impl ArtifactError {
    pub fn invalid(kind: ArtifactKind, message: impl Into<String>) -> Self {
        ArtifactError::Invalid {
            kind,
            message: message.into(),
        }
    }
}

/// Ordered column layout the model and scaler were trained on
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSchema {
    columns: Arc<[String]>,
    index: HashMap<String, usize>,
}

impl TrainingSchema {
    pub fn new(columns: Vec<String>) -> Result<Self, ArtifactError> {
        if columns.is_empty() {
            return Err(ArtifactError::EmptySchema);
        }

        let mut index = HashMap::with_capacity(columns.len());
        for (position, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), position).is_some() {
                return Err(ArtifactError::DuplicateColumn(name.clone()));
            }
        }

        Ok(Self {
            columns: columns.into(),
            index,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Shared handle to the column list, cloned into aligned records
    pub fn shared_columns(&self) -> Arc<[String]> {
        Arc::clone(&self.columns)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }
}

/// Locations of the three artifacts
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub columns: PathBuf,
}

impl ArtifactPaths {
    /// Standard file names inside one artifact directory
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            model: dir.join(MODEL_FILE),
            scaler: dir.join(SCALER_FILE),
            columns: dir.join(COLUMNS_FILE),
        }
    }
}

/// Read and deserialize one JSON artifact
pub fn read_json<T: DeserializeOwned>(path: &Path, kind: ArtifactKind) -> Result<T, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        kind,
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::Parse {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

/// Load the training column list
pub fn load_schema(path: &Path) -> Result<TrainingSchema, ArtifactError> {
    let columns: Vec<String> = read_json(path, ArtifactKind::Schema)?;
    log::debug!("Loaded {} training columns from {}", columns.len(), path.display());
    TrainingSchema::new(columns)
}
