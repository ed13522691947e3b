//! HTTP request handlers organized by resource type

pub mod fabric_networks;
pub mod health;
pub mod networks;
pub mod vlans;

pub use fabric_networks::{
    create_fabric_network_handler, delete_fabric_network_handler, get_fabric_network_handler,
    list_fabric_networks_handler, update_fabric_network_handler,
};
pub use health::health_handler;
pub use networks::{get_network_handler, list_networks_handler};
pub use vlans::{
    create_vlan_handler, delete_vlan_handler, get_vlan_handler, list_vlans_handler,
    update_vlan_handler,
};
