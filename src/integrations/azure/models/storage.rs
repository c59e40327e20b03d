use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StorageSku {
    pub name: String,
}

/// Create body for the storage account hosting the unmanaged disk blobs.
/// The account is only ever referenced through blob URIs, never read back.
#[derive(Debug, Clone, Serialize)]
pub struct StorageAccountParameters {
    pub sku: StorageSku,
    pub kind: String,
    pub location: String,
}

impl StorageAccountParameters {
    pub fn standard_lrs(location: &str) -> Self {
        Self {
            sku: StorageSku {
                name: "Standard_LRS".to_string(),
            },
            kind: "StorageV2".to_string(),
            location: location.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StorageAccountParameters;
    use serde_json::json;

    #[test]
    fn standard_lrs_account_wire_form() {
        let parameters = StorageAccountParameters::standard_lrs("westus");
        assert_eq!(
            serde_json::to_value(&parameters).unwrap(),
            json!({
                "sku": {"name": "Standard_LRS"},
                "kind": "StorageV2",
                "location": "westus"
            })
        );
    }
}
