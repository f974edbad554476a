use std::fmt;

use crate::config::ConfigError;
use crate::encoding::EncodingError;
use crate::model::ClassifierError;
use crate::report::ExportError;

/// Top-level error for one screening request.
#[derive(Debug)]
pub enum MalpredError {
    Encoding(EncodingError),
    Classifier(ClassifierError),
    Export(ExportError),
    Config(ConfigError),
}

impl fmt::Display for MalpredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalpredError::Encoding(e) => write!(f, "{}", e),
            MalpredError::Classifier(e) => write!(f, "{}", e),
            MalpredError::Export(e) => write!(f, "{}", e),
            MalpredError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for MalpredError {}

impl From<EncodingError> for MalpredError {
    fn from(e: EncodingError) -> Self {
        MalpredError::Encoding(e)
    }
}

impl From<ClassifierError> for MalpredError {
    fn from(e: ClassifierError) -> Self {
        MalpredError::Classifier(e)
    }
}

impl From<ExportError> for MalpredError {
    fn from(e: ExportError) -> Self {
        MalpredError::Export(e)
    }
}

impl From<ConfigError> for MalpredError {
    fn from(e: ConfigError) -> Self {
        MalpredError::Config(e)
    }
}
