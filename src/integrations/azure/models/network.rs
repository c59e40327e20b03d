use serde::{Deserialize, Serialize};

/// Reference to another ARM resource by id, as embedded in request bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubResource {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSpace {
    pub address_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualNetworkProperties {
    pub address_space: AddressSpace,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualNetwork {
    pub location: String,
    pub properties: VirtualNetworkProperties,
}

impl VirtualNetwork {
    pub fn with_address_space(location: &str, prefix: &str) -> Self {
        Self {
            location: location.to_string(),
            properties: VirtualNetworkProperties {
                address_space: AddressSpace {
                    address_prefixes: vec![prefix.to_string()],
                },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_prefix: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subnet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub properties: SubnetProperties,
}

impl Subnet {
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            id: None,
            name: None,
            properties: SubnetProperties {
                address_prefix: Some(prefix.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicIpDnsSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_name_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicIpAddressProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_settings: Option<PublicIpDnsSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicIpAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub location: String,
    pub properties: PublicIpAddressProperties,
}

impl PublicIpAddress {
    pub fn with_dns_label(location: &str, label: &str) -> Self {
        Self {
            id: None,
            location: location.to_string(),
            properties: PublicIpAddressProperties {
                dns_settings: Some(PublicIpDnsSettings {
                    domain_name_label: Some(label.to_string()),
                    fqdn: None,
                }),
            },
        }
    }

    /// Fully-qualified name the platform assigned to the address, known
    /// only after creation.
    pub fn fqdn(&self) -> Option<&str> {
        self.properties
            .dns_settings
            .as_ref()
            .and_then(|dns| dns.fqdn.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpConfigurationProperties {
    pub subnet: SubResource,
    #[serde(
        rename = "publicIPAddress",
        skip_serializing_if = "Option::is_none"
    )]
    pub public_ip_address: Option<SubResource>,
    #[serde(rename = "privateIPAllocationMethod")]
    pub private_ip_allocation_method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpConfiguration {
    pub name: String,
    pub properties: IpConfigurationProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterfaceProperties {
    pub ip_configurations: Vec<IpConfiguration>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkInterface {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub location: String,
    pub properties: NetworkInterfaceProperties,
}

impl NetworkInterface {
    /// Interface with a single dynamically-allocated IP configuration bound
    /// to the given subnet and public address.
    pub fn single_ip_configuration(
        location: &str,
        configuration_name: &str,
        subnet_id: &str,
        public_ip_id: &str,
    ) -> Self {
        Self {
            id: None,
            location: location.to_string(),
            properties: NetworkInterfaceProperties {
                ip_configurations: vec![IpConfiguration {
                    name: configuration_name.to_string(),
                    properties: IpConfigurationProperties {
                        subnet: SubResource {
                            id: subnet_id.to_string(),
                        },
                        public_ip_address: Some(SubResource {
                            id: public_ip_id.to_string(),
                        }),
                        private_ip_allocation_method: "Dynamic".to_string(),
                    },
                }],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NetworkInterface, PublicIpAddress, Subnet, VirtualNetwork};
    use serde_json::json;

    #[test]
    fn virtual_network_wire_form() {
        let vnet = VirtualNetwork::with_address_space("westus", "10.0.0.0/16");
        assert_eq!(
            serde_json::to_value(&vnet).unwrap(),
            json!({
                "location": "westus",
                "properties": {"addressSpace": {"addressPrefixes": ["10.0.0.0/16"]}}
            })
        );
    }

    #[test]
    fn subnet_wire_form_omits_unset_identifiers() {
        let subnet = Subnet::with_prefix("10.0.0.0/24");
        assert_eq!(
            serde_json::to_value(&subnet).unwrap(),
            json!({"properties": {"addressPrefix": "10.0.0.0/24"}})
        );
    }

    #[test]
    fn network_interface_wire_form_uses_arm_field_casing() {
        let nic = NetworkInterface::single_ip_configuration(
            "westus",
            "ipconfig-linux-vm",
            "/subscriptions/s/virtualNetworks/v/subnets/n",
            "/subscriptions/s/publicIPAddresses/p",
        );
        assert_eq!(
            serde_json::to_value(&nic).unwrap(),
            json!({
                "location": "westus",
                "properties": {
                    "ipConfigurations": [{
                        "name": "ipconfig-linux-vm",
                        "properties": {
                            "subnet": {"id": "/subscriptions/s/virtualNetworks/v/subnets/n"},
                            "publicIPAddress": {"id": "/subscriptions/s/publicIPAddresses/p"},
                            "privateIPAllocationMethod": "Dynamic"
                        }
                    }]
                }
            })
        );
    }

    #[test]
    fn fqdn_reads_through_the_dns_settings() {
        let pip: PublicIpAddress = serde_json::from_value(json!({
            "id": "/subscriptions/s/publicIPAddresses/pip-linux-vm",
            "location": "westus",
            "properties": {"dnsSettings": {"domainNameLabel": "azvm-linux", "fqdn": "azvm-linux.westus.cloudapp.azure.com"}}
        }))
        .unwrap();

        assert_eq!(pip.fqdn(), Some("azvm-linux.westus.cloudapp.azure.com"));
    }
}
