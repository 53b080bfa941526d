//! @acp:module "Build Descriptor"
//! @acp:summary "What the packaged artifact declares about itself"
//! @acp:domain cli
//! @acp:layer config
//!
//! Mirrors the package manifest: which binary is produced, which type receives
//! control at launch, where dependencies come from, and which quality gate the
//! build applies. Evaluating it twice yields byte-identical output.

use serde::Serialize;

use crate::deck::DeckCatalog;
use crate::error::Result;

/// Type the binary hands control to
pub const ENTRY_POINT: &str = "primus::app::PrimusApp";

/// Name of the produced executable
pub const BINARY: &str = "primus";

/// The only registry dependencies are resolved from
pub const DEPENDENCY_SOURCE: &str = "crates-io";

/// @acp:summary "Lint gate declared in the manifest"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityGate {
    pub tool: &'static str,
    /// Minimum toolchain the gate is defined against
    pub rust_version: &'static str,
    pub forbid: Vec<&'static str>,
    pub deny: Vec<&'static str>,
    pub warn: Vec<&'static str>,
}

impl QualityGate {
    pub fn current() -> Self {
        Self {
            tool: "clippy",
            rust_version: env!("CARGO_PKG_RUST_VERSION"),
            forbid: vec!["unsafe_code"],
            deny: vec!["unused_must_use"],
            warn: vec![
                "clippy::dbg_macro",
                "clippy::todo",
                "clippy::unwrap_used",
                "clippy::expect_used",
                "clippy::print_literal",
            ],
        }
    }
}

/// @acp:summary "Declared configuration of this build"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildDescriptor {
    pub package: &'static str,
    pub version: &'static str,
    pub binary: &'static str,
    pub entry_point: &'static str,
    pub dependency_source: &'static str,
    pub profile: &'static str,
    pub quality: QualityGate,
    /// SHA-256 of the embedded standard deck
    pub deck_fingerprint: String,
}

impl BuildDescriptor {
    pub fn current() -> Result<Self> {
        Ok(Self {
            package: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            binary: BINARY,
            entry_point: ENTRY_POINT,
            dependency_source: DEPENDENCY_SOURCE,
            profile: env!("PRIMUS_BUILD_PROFILE"),
            quality: QualityGate::current(),
            deck_fingerprint: DeckCatalog::standard()?.fingerprint()?,
        })
    }

    /// Pretty JSON; struct field order keeps it stable
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_point() {
        let descriptor = BuildDescriptor::current().unwrap();
        assert_eq!(descriptor.entry_point, "primus::app::PrimusApp");
        assert_eq!(descriptor.binary, "primus");
        assert_eq!(descriptor.package, "primus");
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let first = BuildDescriptor::current().unwrap().to_json().unwrap();
        let second = BuildDescriptor::current().unwrap().to_json().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_entry_point_names_a_real_type() {
        let name = std::any::type_name::<crate::app::PrimusApp>();
        assert_eq!(name, ENTRY_POINT);
    }
}
