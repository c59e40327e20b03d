mod network_interface;
mod public_ip;
mod resource_group;
mod storage_account;
mod virtual_machine;
mod virtual_network;
