//! The various font tables

pub mod loca;
