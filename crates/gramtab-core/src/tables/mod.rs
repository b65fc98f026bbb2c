//! Table builders.
//!
//! Builders only read the [`Grammar`](crate::ir::Grammar) and the shared
//! [`CapabilityIndex`](crate::capability::CapabilityIndex); none depends on
//! another builder's output.

pub mod enum_strings;
pub mod instructions;
pub mod operand_kinds;

pub use enum_strings::{CapabilityStrings, CapabilitySymbol, Extension, ExtensionVocabulary};
pub use instructions::{
    EXT_INST_NAME, InstructionRow, InstructionTable, Opcode, build_ext_inst_table,
    build_instruction_table,
};
pub use operand_kinds::{
    EnumerantBlock, EnumerantRow, GroupRow, OPTIONAL_ALIAS_KINDS, OperandKindTable,
    build_operand_kind_table,
};
