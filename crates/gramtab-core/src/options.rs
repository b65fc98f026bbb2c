//! Options controlling how tables are spelled.

use crate::capability::CapabilityEncoding;
use serde::Deserialize;

/// Symbol spellings and encodings used when building and rendering tables.
///
/// Example config.toml:
/// ```toml
/// [tables]
/// capability_encoding = "list"   # "list" or "mask"
/// variable_prefix = "pygen_variable"
/// opcode_prefix = "SpvOp"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableOptions {
    /// How capability requirements are encoded.
    pub capability_encoding: CapabilityEncoding,
    /// Prefix of every generated variable name.
    pub variable_prefix: String,
    /// Prefix of opcode symbols (`SpvOpNop`).
    pub opcode_prefix: String,
    /// Prefix of capability symbols (`SpvCapabilityShader`).
    pub capability_prefix: String,
    /// Name of the capability enumeration type.
    pub capability_type: String,
    /// Name of the extension enumeration type.
    pub extension_type: String,
    /// Prefix of extension enumerators (`kSPV_KHR_shader_ballot`).
    pub extension_prefix: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            capability_encoding: CapabilityEncoding::List,
            variable_prefix: "pygen_variable".to_string(),
            opcode_prefix: "SpvOp".to_string(),
            capability_prefix: "SpvCapability".to_string(),
            capability_type: "SpvCapability".to_string(),
            extension_type: "Extension".to_string(),
            extension_prefix: "k".to_string(),
        }
    }
}

impl TableOptions {
    pub fn opcode_symbol(&self, name: &str) -> String {
        format!("{}{}", self.opcode_prefix, name)
    }

    pub fn capability_symbol(&self, name: &str) -> String {
        format!("{}{}", self.capability_prefix, name)
    }

    /// Enumerator name without the type qualifier (`kSPV_KHR_x`).
    pub fn extension_enumerator(&self, name: &str) -> String {
        format!("{}{}", self.extension_prefix, name)
    }

    /// Qualified enumerator (`Extension::kSPV_KHR_x`).
    pub fn extension_symbol(&self, name: &str) -> String {
        format!("{}::{}", self.extension_type, self.extension_enumerator(name))
    }
}
