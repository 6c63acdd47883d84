//! Azure resource identifiers used by the lookup.

use std::fmt;

use serde::Serialize;

use crate::error::DatashareError;

const DATA_SET_NAME_MIN_LEN: usize = 2;
const DATA_SET_NAME_MAX_LEN: usize = 90;

/// A parsed Data Share ID.
///
/// The canonical form is
/// `/subscriptions/{sub}/resourceGroups/{rg}/providers/Microsoft.DataShare/accounts/{account}/shares/{share}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShareId {
    pub subscription_id: String,
    pub resource_group: String,
    pub account_name: String,
    pub name: String,
}

impl ShareId {
    /// Parse a Data Share ID, rejecting ids with missing or extra segments.
    pub fn parse(input: &str) -> Result<Self, DatashareError> {
        let mut id = ResourceId::parse(input)?;

        let account_name = id.pop_segment(input, "accounts")?;
        let name = id.pop_segment(input, "shares")?;

        if let Some((key, _)) = id.remaining.first() {
            return Err(invalid(input, format!("unexpected segment '{key}'")));
        }

        Ok(Self {
            subscription_id: id.subscription_id,
            resource_group: id.resource_group,
            account_name,
            name,
        })
    }
}

impl fmt::Display for ShareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.DataShare/accounts/{}/shares/{}",
            self.subscription_id, self.resource_group, self.account_name, self.name
        )
    }
}

/// Generic ARM id split into its well-known parts plus the remaining key/value pairs.
struct ResourceId {
    subscription_id: String,
    resource_group: String,
    remaining: Vec<(String, String)>,
}

impl ResourceId {
    fn parse(input: &str) -> Result<Self, DatashareError> {
        if input.is_empty() {
            return Err(invalid(input, "ID is empty".to_string()));
        }
        let path = input
            .strip_prefix('/')
            .ok_or_else(|| invalid(input, "ID must start with '/'".to_string()))?;
        let path = path.strip_suffix('/').unwrap_or(path);

        let components: Vec<&str> = path.split('/').collect();
        if components.len() % 2 != 0 {
            return Err(invalid(
                input,
                "the number of path segments is not divisible by 2".to_string(),
            ));
        }

        let mut subscription_id = None;
        let mut resource_group = None;
        let mut remaining = Vec::new();

        for pair in components.chunks(2) {
            let (key, value) = (pair[0], pair[1]);
            if key.is_empty() || value.is_empty() {
                return Err(invalid(
                    input,
                    "key/value segments cannot be empty".to_string(),
                ));
            }

            if key == "subscriptions" && subscription_id.is_none() {
                subscription_id = Some(value.to_string());
            } else if key.eq_ignore_ascii_case("resourceGroups") && resource_group.is_none() {
                resource_group = Some(value.to_string());
            } else if key == "providers" {
                // The provider namespace carries no identifying data for the lookup.
            } else {
                remaining.push((key.to_string(), value.to_string()));
            }
        }

        let subscription_id = subscription_id
            .ok_or_else(|| invalid(input, "no subscription ID found".to_string()))?;
        let resource_group = resource_group
            .ok_or_else(|| invalid(input, "no resource group name found".to_string()))?;

        Ok(Self {
            subscription_id,
            resource_group,
            remaining,
        })
    }

    fn pop_segment(&mut self, input: &str, key: &str) -> Result<String, DatashareError> {
        let index = self
            .remaining
            .iter()
            .position(|(k, _)| k == key)
            .ok_or_else(|| invalid(input, format!("ID was missing the '{key}' element")))?;
        Ok(self.remaining.remove(index).1)
    }
}

/// Check that a dataset name is 2-90 characters of letters, digits, `-` and `_`.
pub fn validate_data_set_name(name: &str) -> Result<(), DatashareError> {
    let len = name.chars().count();
    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if !valid_chars || !(DATA_SET_NAME_MIN_LEN..=DATA_SET_NAME_MAX_LEN).contains(&len) {
        return Err(DatashareError::InvalidName {
            name: name.to_string(),
            message: format!(
                "DataSet name can only contain number, letters, - and _, and must be between {} and {} characters long",
                DATA_SET_NAME_MIN_LEN, DATA_SET_NAME_MAX_LEN
            ),
        });
    }

    Ok(())
}

fn invalid(input: &str, message: String) -> DatashareError {
    DatashareError::InvalidIdentifier {
        input: input.to_string(),
        message,
    }
}
