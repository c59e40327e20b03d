use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareProfile {
    pub vm_size: String,
}

/// Platform image a VM boots from, addressed by the marketplace
/// publisher/offer/sku/version quadruple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageReference {
    pub publisher: String,
    pub offer: String,
    pub sku: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualHardDisk {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OsDisk {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vhd: Option<VirtualHardDisk>,
    pub create_option: String,
    #[serde(rename = "diskSizeGB", skip_serializing_if = "Option::is_none")]
    pub disk_size_gb: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataDisk {
    pub lun: i32,
    pub name: String,
    pub vhd: VirtualHardDisk,
    pub create_option: String,
    #[serde(rename = "diskSizeGB", skip_serializing_if = "Option::is_none")]
    pub disk_size_gb: Option<i32>,
}

impl DataDisk {
    /// New empty disk at the given LUN, backed by a page blob at `uri`.
    pub fn empty(lun: i32, name: &str, uri: &str, size_gb: i32) -> Self {
        Self {
            lun,
            name: name.to_string(),
            vhd: VirtualHardDisk {
                uri: uri.to_string(),
            },
            create_option: "Empty".to_string(),
            disk_size_gb: Some(size_gb),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_reference: Option<ImageReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_disk: Option<OsDisk>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_disks: Option<Vec<DataDisk>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OsProfile {
    pub computer_name: String,
    pub admin_username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkInterfaceReferenceProperties {
    pub primary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkInterfaceReference {
    pub id: String,
    pub properties: NetworkInterfaceReferenceProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    pub network_interfaces: Vec<NetworkInterfaceReference>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_profile: Option<HardwareProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_profile: Option<StorageProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_profile: Option<OsProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_profile: Option<NetworkProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualMachine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
    pub properties: VirtualMachineProperties,
}

impl VirtualMachine {
    /// Create-or-update body for a VM booted from a platform image, with an
    /// unmanaged OS disk at `os_disk_uri` and one primary network interface.
    #[allow(clippy::too_many_arguments)]
    pub fn from_image(
        location: &str,
        vm_size: &str,
        image: ImageReference,
        os_disk_uri: &str,
        nic_id: &str,
        computer_name: &str,
        admin_username: &str,
        admin_password: &str,
    ) -> Self {
        Self {
            id: None,
            name: None,
            resource_type: None,
            location: location.to_string(),
            tags: None,
            properties: VirtualMachineProperties {
                hardware_profile: Some(HardwareProfile {
                    vm_size: vm_size.to_string(),
                }),
                storage_profile: Some(StorageProfile {
                    image_reference: Some(image),
                    os_disk: Some(OsDisk {
                        name: Some("osDisk".to_string()),
                        vhd: Some(VirtualHardDisk {
                            uri: os_disk_uri.to_string(),
                        }),
                        create_option: "FromImage".to_string(),
                        disk_size_gb: None,
                    }),
                    data_disks: None,
                }),
                os_profile: Some(OsProfile {
                    computer_name: computer_name.to_string(),
                    admin_username: admin_username.to_string(),
                    admin_password: Some(admin_password.to_string()),
                }),
                network_profile: Some(NetworkProfile {
                    network_interfaces: vec![NetworkInterfaceReference {
                        id: nic_id.to_string(),
                        properties: NetworkInterfaceReferenceProperties { primary: true },
                    }],
                }),
                provisioning_state: None,
            },
        }
    }
}

impl VirtualMachine {
    /// One-line tag dump for operator-facing summaries.
    pub fn tag_summary(&self) -> String {
        match &self.tags {
            Some(tags) if !tags.is_empty() => tags
                .iter()
                .map(|(key, value)| format!("{} = {}", key, value))
                .collect::<Vec<_>>()
                .join("; "),
            _ => "No tags yet".to_string(),
        }
    }
}

/// Envelope of the subscription-wide VM listing.
#[derive(Debug, Deserialize)]
pub struct VirtualMachineListResult {
    pub value: Vec<VirtualMachine>,
}

/// Growth rule applied when resizing the OS disk: sizes the platform never
/// reported (or reported as zero) start from a 256 GB floor, and every
/// resize adds 10 GB on top.
pub fn next_os_disk_size(current: Option<i32>) -> i32 {
    let current = current.unwrap_or(0);
    let base = if current <= 0 { 256 } else { current };
    base + 10
}

#[cfg(test)]
mod tests {
    use super::{DataDisk, ImageReference, VirtualMachine, next_os_disk_size};
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn unreported_disk_sizes_grow_from_the_floor() {
        assert_eq!(next_os_disk_size(None), 266);
        assert_eq!(next_os_disk_size(Some(0)), 266);
        assert_eq!(next_os_disk_size(Some(-5)), 266);
    }

    #[test]
    fn reported_disk_sizes_grow_by_ten() {
        assert_eq!(next_os_disk_size(Some(256)), 266);
        assert_eq!(next_os_disk_size(Some(500)), 510);
    }

    #[test]
    fn data_disk_wire_form() {
        let disk = DataDisk::empty(
            0,
            "dataDisk",
            "https://account.blob.core.windows.net/vhds/datadisk-linux-vm.vhd",
            1,
        );
        assert_eq!(
            serde_json::to_value(&disk).unwrap(),
            json!({
                "lun": 0,
                "name": "dataDisk",
                "vhd": {"uri": "https://account.blob.core.windows.net/vhds/datadisk-linux-vm.vhd"},
                "createOption": "Empty",
                "diskSizeGB": 1
            })
        );
    }

    #[test]
    fn vm_from_image_wire_form() {
        let vm = VirtualMachine::from_image(
            "westus",
            "Standard_DS1",
            ImageReference {
                publisher: "Canonical".to_string(),
                offer: "UbuntuServer".to_string(),
                sku: "16.04.0-LTS".to_string(),
                version: "latest".to_string(),
            },
            "https://account.blob.core.windows.net/vhds/linux-vm.vhd",
            "/subscriptions/s/networkInterfaces/nic-linux-vm",
            "linux-vm",
            "notadmin",
            "hunter2hunter2A1!",
        );

        assert_eq!(
            serde_json::to_value(&vm).unwrap(),
            json!({
                "location": "westus",
                "properties": {
                    "hardwareProfile": {"vmSize": "Standard_DS1"},
                    "storageProfile": {
                        "imageReference": {
                            "publisher": "Canonical",
                            "offer": "UbuntuServer",
                            "sku": "16.04.0-LTS",
                            "version": "latest"
                        },
                        "osDisk": {
                            "name": "osDisk",
                            "vhd": {"uri": "https://account.blob.core.windows.net/vhds/linux-vm.vhd"},
                            "createOption": "FromImage"
                        }
                    },
                    "osProfile": {
                        "computerName": "linux-vm",
                        "adminUsername": "notadmin",
                        "adminPassword": "hunter2hunter2A1!"
                    },
                    "networkProfile": {
                        "networkInterfaces": [{
                            "id": "/subscriptions/s/networkInterfaces/nic-linux-vm",
                            "properties": {"primary": true}
                        }]
                    }
                }
            })
        );
    }

    #[test]
    fn tag_summary_renders_pairs_or_a_placeholder() {
        let mut vm = VirtualMachine::from_image(
            "westus",
            "Standard_DS1",
            ImageReference {
                publisher: "Canonical".to_string(),
                offer: "UbuntuServer".to_string(),
                sku: "16.04.0-LTS".to_string(),
                version: "latest".to_string(),
            },
            "https://account.blob.core.windows.net/vhds/linux-vm.vhd",
            "/subscriptions/s/networkInterfaces/nic-linux-vm",
            "linux-vm",
            "notadmin",
            "hunter2hunter2A1!",
        );
        assert_eq!(vm.tag_summary(), "No tags yet");

        vm.tags = Some(BTreeMap::from([
            ("who rocks".to_string(), "rust".to_string()),
            ("where".to_string(), "on azure".to_string()),
        ]));
        assert_eq!(vm.tag_summary(), "where = on azure; who rocks = rust");
    }

    #[test]
    fn detached_data_disks_serialize_as_an_empty_list() {
        let mut vm = VirtualMachine::from_image(
            "westus",
            "Standard_DS1",
            ImageReference {
                publisher: "Canonical".to_string(),
                offer: "UbuntuServer".to_string(),
                sku: "16.04.0-LTS".to_string(),
                version: "latest".to_string(),
            },
            "https://account.blob.core.windows.net/vhds/linux-vm.vhd",
            "/subscriptions/s/networkInterfaces/nic-linux-vm",
            "linux-vm",
            "notadmin",
            "hunter2hunter2A1!",
        );
        vm.properties.storage_profile.as_mut().unwrap().data_disks = Some(Vec::new());

        let body = serde_json::to_value(&vm).unwrap();
        assert_eq!(body["properties"]["storageProfile"]["dataDisks"], json!([]));
    }
}
