//! Domain layer for the pixgrid photo gallery backend.
//!
//! Holds the photo model, the response cache, the mock photo generator,
//! the upstream source capability, and the query/action services built on
//! top of them. Nothing in this crate performs network or database I/O
//! directly; those concerns are injected through [`source::PhotoSource`]
//! and [`actions::ActionStore`].

pub mod actions;
pub mod cache;
pub mod error;
pub mod mock;
pub mod photo;
pub mod service;
pub mod source;
pub mod types;
