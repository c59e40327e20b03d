mod auth;
mod interface;
pub mod models;
mod operation;
mod resource_manager;
mod resources;

pub use interface::{AzureInterface, DemoContext};
pub use resource_manager::{MACHINES, MachineDefinition, demo_tags};
