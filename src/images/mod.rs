// src/images/mod.rs

pub mod guard;
pub mod handlers;
pub mod normalizer;
pub mod routes;

#[cfg(test)]
mod tests;

pub use routes::images_routes;
