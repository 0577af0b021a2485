//! Integration tests for docstree

mod cli_contracts;
mod forest_properties;
mod support;
