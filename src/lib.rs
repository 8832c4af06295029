#![allow(clippy::type_complexity)]

pub mod config;
pub mod error;
pub mod games;
pub mod info;
pub mod interval;
pub mod ismcts;
pub mod model;
pub mod session;
pub mod utils;
