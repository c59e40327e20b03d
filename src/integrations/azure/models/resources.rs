use serde::Serialize;

/// Create-or-update body for a resource group.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceGroupParameters {
    pub location: String,
}
