use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Identifying tuple of a dataset lookup, used to give remote failures context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataSetContext {
    pub name: String,
    pub resource_group: String,
    pub account_name: String,
    pub share_name: String,
}

impl fmt::Display for DataSetContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DataShare Blob Storage DataSet {:?} (Resource Group {:?} / accountName {:?} / shareName {:?})",
            self.name, self.resource_group, self.account_name, self.share_name
        )
    }
}

/// The main error type for datashare-blob operations.
#[derive(Debug, Error)]
pub enum DatashareError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid dataset name {name:?}: {message}")]
    InvalidName { name: String, message: String },

    #[error("invalid Data Share ID {input:?}: {message}")]
    InvalidIdentifier { input: String, message: String },

    #[error("retrieving {context}: {message}")]
    RemoteError {
        context: DataSetContext,
        message: String,
    },

    #[error("{context} was not found")]
    NotFound { context: DataSetContext },

    #[error("timed out after {timeout_secs}s retrieving {context}")]
    Timeout {
        context: DataSetContext,
        timeout_secs: u64,
    },

    #[error("empty or nil ID returned for reading {context}")]
    EmptyIdentifier { context: DataSetContext },

    #[error(
        "data share dataset {:?} (Resource Group {:?} / accountName {:?} / shareName {:?}) is not a blob storage dataset (kind {:?})",
        .context.name, .context.resource_group, .context.account_name, .context.share_name, .kind
    )]
    UnsupportedVariant {
        context: DataSetContext,
        kind: String,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write JSON output: {source}")]
    JsonWrite {
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
