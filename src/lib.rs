//! Prof Alloc - weapon proficiency point allocation

pub mod character;
pub mod core;
pub mod profs;
pub mod tables;
pub mod ui;
