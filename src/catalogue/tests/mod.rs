//! Test utilities for rule catalogue testing

use super::RuleCatalogue;

// Test modules
mod builder_tests;
mod lookup_tests;

/// Shared standard catalogue
pub fn standard_catalogue() -> &'static RuleCatalogue {
    RuleCatalogue::global().expect("standard catalogue must build")
}
