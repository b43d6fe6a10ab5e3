//! Log data acquisition
//!
//! Turns LAS text into a [`crate::types::LogDataset`] and works out which
//! curves play which petrophysical role.

pub mod curve_mapper;
pub mod las_parser;

pub use curve_mapper::{map_curves, map_mnemonics, map_role};
pub use las_parser::{parse_header_line, parse_las, try_parse_las, LasError};
