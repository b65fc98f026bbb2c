//! Descriptor table compiler for instruction-set grammars.
//!
//! `gramtab-core` reads a declarative instruction grammar (opcodes, operand
//! shapes, enumerated operand vocabularies) and builds the index-stable
//! descriptor tables a binary-format validator, assembler, or disassembler
//! compiles in as static initializers.
//!
//! # Architecture
//!
//! ```text
//! Input               IR / Index              Tables                    Fragments
//! ─────────       ─────────────────      ─────────────────────      ─────────────────
//! core.json  ─┐                       ┌─> InstructionTable    ─┐
//! glsl.json  ─┼─> Grammar ────────────┼─> OperandKindTable    ─┼─> Fragment::render
//! opencl.json─┘   (ir.rs)             ├─> ExtensionVocabulary ─┤   (output/)
//!                 CapabilityIndex ────┴─> CapabilityStrings   ─┘
//!                 (capability.rs)
//! ```
//!
//! Operand kinds are mapped to canonical type tags by
//! [`canonical::canonicalize`]. Builders never depend on one another.
//!
//! # Example
//!
//! ```
//! use gramtab_core::{CapabilityIndex, Fragment, TableOptions};
//! use gramtab_core::ir::GrammarFlavor;
//!
//! let grammar = gramtab_core::input::parse_grammar_str(
//!     r#"{
//!         "instructions": [{ "opname": "OpNop", "opcode": 0 }],
//!         "operand_kinds": [{
//!             "category": "ValueEnum",
//!             "kind": "Capability",
//!             "enumerants": [{ "enumerant": "Shader", "value": 1 }]
//!         }]
//!     }"#,
//!     GrammarFlavor::Core,
//! )
//! .unwrap();
//!
//! let options = TableOptions::default();
//! let caps = CapabilityIndex::from_grammar(&grammar).unwrap();
//! let table = gramtab_core::tables::build_instruction_table(&grammar, &caps, &options).unwrap();
//! assert_eq!(table.render(&options), "{\"Nop\", SpvOpNop, {}, 0, {}, 0, 0}\n");
//! ```

pub mod canonical;
pub mod capability;
pub mod error;
pub mod input;
pub mod ir;
pub mod options;
pub mod output;
pub mod tables;
pub mod traits;

pub use canonical::{OperandTag, canonicalize};
pub use capability::{Capabilities, CapabilityEncoding, CapabilityIndex};
pub use error::{EmitError, Error, GrammarFormatError, Result, SchemaError};
pub use options::TableOptions;
pub use traits::{Fragment, FragmentKind};
