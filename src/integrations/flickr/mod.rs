// src/integrations/flickr/mod.rs

pub mod client;

pub use client::FlickrClient;
