//! Traits for rendering tables to source fragments.

use crate::options::TableOptions;
use std::fmt;

/// Kind of emitted fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// Core opcode descriptors.
    CoreInstructions,
    /// Opcode descriptors of an extended instruction set.
    ExtInstructions,
    /// Enumerant blocks plus the operand group table.
    OperandKinds,
    /// Body of the extension enumeration.
    ExtensionEnum,
    /// Extension to string and string to extension lookups.
    ExtensionStrings,
    /// Capability to string lookup.
    CapabilityStrings,
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FragmentKind::CoreInstructions => "core instruction table",
            FragmentKind::ExtInstructions => "extended instruction table",
            FragmentKind::OperandKinds => "operand kind table",
            FragmentKind::ExtensionEnum => "extension enumeration",
            FragmentKind::ExtensionStrings => "extension string tables",
            FragmentKind::CapabilityStrings => "capability string table",
        })
    }
}

/// A built table that renders to a source fragment.
///
/// Fragments use the static-initializer syntax of the consuming C/C++
/// sources and always end with a single newline.
pub trait Fragment {
    fn kind(&self) -> FragmentKind;

    fn render(&self, options: &TableOptions) -> String;
}
