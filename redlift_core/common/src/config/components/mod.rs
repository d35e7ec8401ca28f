pub mod aws;
pub mod cluster;
pub mod warehouse;
