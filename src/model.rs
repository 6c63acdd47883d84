//! Wire model of the Data Share "get dataset" response.
//!
//! The service returns a polymorphic resource discriminated by `kind`. Only
//! the blob family is decoded in full; every other kind is kept as
//! [`DataSetVariant::Other`] so callers can report what they received.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Properties of a single blob dataset (`kind: "Blob"`).
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BlobProperties {
    #[serde(deserialize_with = "null_as_empty")]
    pub container_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub storage_account_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub resource_group: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub subscription_id: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub file_path: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub data_set_id: String,
}

/// Properties of a blob folder dataset (`kind: "BlobFolder"`).
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BlobFolderProperties {
    #[serde(deserialize_with = "null_as_empty")]
    pub container_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub storage_account_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub resource_group: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub subscription_id: String,
    /// Folder path inside the container.
    #[serde(deserialize_with = "null_as_empty")]
    pub prefix: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub data_set_id: String,
}

/// Properties of a whole-container dataset (`kind: "Container"`).
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BlobContainerProperties {
    #[serde(deserialize_with = "null_as_empty")]
    pub container_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub storage_account_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub resource_group: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub subscription_id: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub data_set_id: String,
}

/// The kind-specific part of a dataset.
///
/// Properties are optional because the service may omit them; a missing
/// object maps to empty fields downstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSetVariant {
    Blob(Option<BlobProperties>),
    BlobFolder(Option<BlobFolderProperties>),
    BlobContainer(Option<BlobContainerProperties>),
    Other { kind: String },
}

impl DataSetVariant {
    /// The wire `kind` this variant was decoded from.
    pub fn kind(&self) -> &str {
        match self {
            Self::Blob(_) => "Blob",
            Self::BlobFolder(_) => "BlobFolder",
            Self::BlobContainer(_) => "Container",
            Self::Other { kind } => kind,
        }
    }
}

/// A dataset resource as returned by the service.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawDataSet")]
pub struct DataSet {
    /// Full ARM resource id, when the service returned one.
    pub id: Option<String>,
    pub name: Option<String>,
    pub variant: DataSetVariant,
}

#[derive(Deserialize)]
struct RawDataSet {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    kind: String,
    #[serde(default)]
    properties: Option<Value>,
}

impl TryFrom<RawDataSet> for DataSet {
    type Error = serde_json::Error;

    fn try_from(raw: RawDataSet) -> Result<Self, Self::Error> {
        let variant = match raw.kind.as_str() {
            "Blob" => DataSetVariant::Blob(decode_properties(raw.properties)?),
            "BlobFolder" => DataSetVariant::BlobFolder(decode_properties(raw.properties)?),
            "Container" => DataSetVariant::BlobContainer(decode_properties(raw.properties)?),
            _ => DataSetVariant::Other { kind: raw.kind },
        };

        Ok(Self {
            id: raw.id,
            name: raw.name,
            variant,
        })
    }
}

fn decode_properties<T>(properties: Option<Value>) -> Result<Option<T>, serde_json::Error>
where
    T: for<'de> Deserialize<'de>,
{
    match properties {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some),
    }
}

/// Decode a string that the service may send as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Error payload of an ARM API response: `{"error": {"code": ..., "message": ...}}`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ArmErrorResponse {
    #[serde(default)]
    pub error: ArmErrorDetail,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ArmErrorDetail {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_dataset_is_decoded() {
        let json = serde_json::json!({
            "id": "/subscriptions/sub/resourceGroups/rg1/providers/Microsoft.DataShare/accounts/acc1/shares/share1/dataSets/ds1",
            "name": "ds1",
            "type": "Microsoft.DataShare/accounts/shares/dataSets",
            "kind": "Blob",
            "properties": {
                "containerName": "c1",
                "storageAccountName": "storage1",
                "resourceGroup": "storage-rg",
                "subscriptionId": "sub",
                "filePath": "a/b.csv",
                "dataSetId": "ds1"
            }
        });

        let data_set: DataSet = serde_json::from_value(json).expect("decode");
        assert_eq!(data_set.name.as_deref(), Some("ds1"));
        match data_set.variant {
            DataSetVariant::Blob(Some(props)) => {
                assert_eq!(props.container_name, "c1");
                assert_eq!(props.file_path, "a/b.csv");
                assert_eq!(props.data_set_id, "ds1");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn blob_folder_prefix_is_decoded() {
        let json = serde_json::json!({
            "id": "x",
            "kind": "BlobFolder",
            "properties": {"containerName": "c1", "prefix": "raw/2020"}
        });

        let data_set: DataSet = serde_json::from_value(json).expect("decode");
        match data_set.variant {
            DataSetVariant::BlobFolder(Some(props)) => {
                assert_eq!(props.prefix, "raw/2020");
                assert_eq!(props.storage_account_name, "");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn container_kind_without_properties() {
        let json = serde_json::json!({"id": "x", "kind": "Container"});
        let data_set: DataSet = serde_json::from_value(json).expect("decode");
        assert_eq!(data_set.variant, DataSetVariant::BlobContainer(None));
        assert_eq!(data_set.variant.kind(), "Container");
    }

    #[test]
    fn non_blob_kinds_are_kept_as_other() {
        let json = serde_json::json!({
            "id": "x",
            "kind": "AdlsGen2File",
            "properties": {"fileSystem": "fs", "filePath": "a.csv"}
        });
        let data_set: DataSet = serde_json::from_value(json).expect("decode");
        assert_eq!(
            data_set.variant,
            DataSetVariant::Other {
                kind: "AdlsGen2File".to_string()
            }
        );
    }

    #[test]
    fn null_properties_decode_as_empty() {
        let json = serde_json::json!({
            "id": "/x/dataSets/ds1",
            "kind": "Blob",
            "properties": {
                "containerName": "c1",
                "storageAccountName": null,
                "filePath": null,
                "dataSetId": null
            }
        });
        let data_set: DataSet = serde_json::from_value(json).expect("decode");
        match data_set.variant {
            DataSetVariant::Blob(Some(props)) => {
                assert_eq!(props.container_name, "c1");
                assert_eq!(props.storage_account_name, "");
                assert_eq!(props.file_path, "");
                assert_eq!(props.data_set_id, "");
            }
            other => panic!("unexpected variant: {other:?}"),
        }

        let json = serde_json::json!({
            "id": "/x/dataSets/ds1",
            "kind": "BlobFolder",
            "properties": {"containerName": "c1", "prefix": null, "dataSetId": null}
        });
        let data_set: DataSet = serde_json::from_value(json).expect("decode");
        match data_set.variant {
            DataSetVariant::BlobFolder(Some(props)) => assert_eq!(props.prefix, ""),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn arm_error_body_is_decoded() {
        let body: ArmErrorResponse = serde_json::from_str(
            r#"{"error": {"code": "ResourceNotFound", "message": "DataSet ds1 not found"}}"#,
        )
        .expect("decode");
        assert_eq!(body.error.code, "ResourceNotFound");
        assert_eq!(body.error.message, "DataSet ds1 not found");
    }
}
