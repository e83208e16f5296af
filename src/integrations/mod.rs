// src/integrations/mod.rs
//
// External Integrations Module

pub mod catalog;
pub mod flickr;

pub use catalog::{CatalogClient, CatalogPhotoDto};
pub use flickr::client::FlickrClient;
