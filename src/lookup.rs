//! Blob storage dataset lookup.
//!
//! Fetches a dataset of a share and flattens the blob-family variants into a
//! single [`BlobStorageDataSet`] record.

use serde::Serialize;

use crate::client::{ClientError, DataSetClient};
use crate::error::{DataSetContext, DatashareError};
use crate::ids::{validate_data_set_name, ShareId};
use crate::model::DataSetVariant;

/// Flat view of a blob, blob folder, or blob container dataset.
///
/// `file_path` is only set for blobs and `folder_path` only for blob folders.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BlobStorageDataSet {
    pub id: String,
    pub name: String,
    pub share_id: String,
    pub container_name: String,
    pub storage_account_name: String,
    pub storage_account_resource_group_name: String,
    pub storage_account_subscription_id: String,
    pub file_path: String,
    pub folder_path: String,
    pub display_name: String,
}

impl BlobStorageDataSet {
    /// All attributes as key/value pairs, in declaration order.
    pub fn to_key_values(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("id", self.id.as_str()),
            ("name", self.name.as_str()),
            ("share_id", self.share_id.as_str()),
            ("container_name", self.container_name.as_str()),
            ("storage_account_name", self.storage_account_name.as_str()),
            (
                "storage_account_resource_group_name",
                self.storage_account_resource_group_name.as_str(),
            ),
            (
                "storage_account_subscription_id",
                self.storage_account_subscription_id.as_str(),
            ),
            ("file_path", self.file_path.as_str()),
            ("folder_path", self.folder_path.as_str()),
            ("display_name", self.display_name.as_str()),
        ]
    }
}

/// Look up a blob storage dataset by name within the share identified by `share_id`.
///
/// Input problems are reported before any request is made.
pub fn read_blob_storage_dataset<C>(
    client: &C,
    name: &str,
    share_id: &str,
) -> Result<BlobStorageDataSet, DatashareError>
where
    C: DataSetClient + ?Sized,
{
    validate_data_set_name(name)?;
    let share = ShareId::parse(share_id)?;

    let context = DataSetContext {
        name: name.to_string(),
        resource_group: share.resource_group.clone(),
        account_name: share.account_name.clone(),
        share_name: share.name.clone(),
    };

    let span = tracing::info_span!(
        "read_blob_storage_dataset",
        data_set = name,
        resource_group = %share.resource_group,
        account = %share.account_name,
        share = %share.name,
    );
    let _guard = span.enter();

    let data_set = client
        .get(&share.resource_group, &share.account_name, &share.name, name)
        .map_err(|source| {
            tracing::warn!(error = %source, "dataset request failed");
            remote_error(context.clone(), source)
        })?;

    let id = match data_set.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return Err(DatashareError::EmptyIdentifier { context }),
    };

    let mut record = BlobStorageDataSet {
        id,
        name: name.to_string(),
        share_id: share_id.to_string(),
        ..Default::default()
    };

    tracing::debug!(kind = data_set.variant.kind(), "mapping dataset");
    match data_set.variant {
        DataSetVariant::Blob(props) => {
            if let Some(props) = props {
                record.container_name = props.container_name;
                record.storage_account_name = props.storage_account_name;
                record.storage_account_resource_group_name = props.resource_group;
                record.storage_account_subscription_id = props.subscription_id;
                record.file_path = props.file_path;
                record.display_name = props.data_set_id;
            }
        }
        DataSetVariant::BlobFolder(props) => {
            if let Some(props) = props {
                record.container_name = props.container_name;
                record.storage_account_name = props.storage_account_name;
                record.storage_account_resource_group_name = props.resource_group;
                record.storage_account_subscription_id = props.subscription_id;
                record.folder_path = props.prefix;
                record.display_name = props.data_set_id;
            }
        }
        DataSetVariant::BlobContainer(props) => {
            if let Some(props) = props {
                record.container_name = props.container_name;
                record.storage_account_name = props.storage_account_name;
                record.storage_account_resource_group_name = props.resource_group;
                record.storage_account_subscription_id = props.subscription_id;
                record.display_name = props.data_set_id;
            }
        }
        DataSetVariant::Other { kind } => {
            return Err(DatashareError::UnsupportedVariant { context, kind });
        }
    }

    tracing::info!(id = %record.id, "dataset retrieved");
    Ok(record)
}

fn remote_error(context: DataSetContext, source: ClientError) -> DatashareError {
    match source {
        ClientError::NotFound => DatashareError::NotFound { context },
        ClientError::Timeout(timeout) => DatashareError::Timeout {
            context,
            timeout_secs: timeout.as_secs(),
        },
        other => DatashareError::RemoteError {
            context,
            message: other.to_string(),
        },
    }
}
