use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Missing columns: {}", format_column_list(.columns))]
    MissingColumns { columns: Vec<String> },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Inference error: {message}")]
    Inference { message: String },

    #[error("Artifact error: {artifact} - {message}")]
    Artifact { artifact: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn missing_columns(columns: Vec<String>) -> Self {
        Self::MissingColumns { columns }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference {
            message: message.into(),
        }
    }

    pub fn artifact(artifact: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Artifact {
            artifact: artifact.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Render column names as a Python-style list literal:
/// `['koi_teq', 'koi_srad']`
pub fn format_column_list(columns: &[String]) -> String {
    let quoted: Vec<String> = columns.iter().map(|c| format!("'{}'", c)).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message() {
        let error = DomainError::missing_columns(vec!["koi_teq".to_string()]);
        assert_eq!(error.to_string(), "Missing columns: ['koi_teq']");
    }

    #[test]
    fn test_missing_columns_message_lists_every_column() {
        let error = DomainError::missing_columns(vec![
            "koi_teq".to_string(),
            "koi_srad".to_string(),
        ]);
        assert_eq!(error.to_string(), "Missing columns: ['koi_teq', 'koi_srad']");
    }

    #[test]
    fn test_artifact_error() {
        let error = DomainError::artifact("scaler.json", "file not found");
        assert_eq!(error.to_string(), "Artifact error: scaler.json - file not found");
    }

    #[test]
    fn test_empty_column_list() {
        assert_eq!(format_column_list(&[]), "[]");
    }
}
