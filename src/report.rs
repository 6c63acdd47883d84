//! Terminal and JSON rendering of lookup results.

use std::fmt;

use crate::error::DatashareError;
use crate::ids::ShareId;
use crate::lookup::BlobStorageDataSet;

/// Output format for command results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self, DatashareError> {
        match value {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(DatashareError::UnsupportedFormat(format!(
                "'{}' (supported: text, json)",
                other
            ))),
        }
    }
}

/// Aligned `key  value` listing of a dataset record.
pub struct DataSetReport<'a>(pub &'a BlobStorageDataSet);

impl fmt::Display for DataSetReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self.0.to_key_values();
        let width = pairs.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

        for (key, value) in pairs {
            let value = if value.is_empty() { "-" } else { value };
            writeln!(f, "{key:<width$}  {value}")?;
        }
        Ok(())
    }
}

/// Component listing of a parsed share id.
pub struct ShareIdReport<'a>(pub &'a ShareId);

impl fmt::Display for ShareIdReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.0;
        writeln!(f, "subscription_id  {}", id.subscription_id)?;
        writeln!(f, "resource_group   {}", id.resource_group)?;
        writeln!(f, "account_name     {}", id.account_name)?;
        writeln!(f, "share_name       {}", id.name)?;
        Ok(())
    }
}

/// Pretty-printed JSON for any serializable result.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, DatashareError> {
    serde_json::to_string_pretty(value).map_err(|source| DatashareError::JsonWrite { source })
}
