//! In-memory model of an instruction grammar.
//!
//! Every input document normalizes to this model before any table is built.
//! The model is built once by [`crate::input`] and only borrowed afterwards.

use std::fmt;

/// Prefix every core instruction name carries (`OpNop`, `OpExtInst`, ...).
pub const OPNAME_PREFIX: &str = "Op";

/// Kind name of the operand kind that enumerates capabilities.
pub const CAPABILITY_KIND: &str = "Capability";

/// A complete grammar document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grammar {
    /// Instructions, in document order.
    pub instructions: Vec<InstructionDef>,
    /// Operand kinds, in document order.
    pub operand_kinds: Vec<OperandKindDef>,
}

/// Which naming rules a grammar document follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarFlavor {
    /// The core grammar: `Op`-prefixed names, opcodes referenced symbolically.
    Core,
    /// An extended instruction set: bare names with explicit numeric opcodes.
    ExtendedInstructionSet,
}

/// One instruction of the grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct InstructionDef {
    /// Name exactly as written in the grammar.
    pub opname: String,
    /// Name used in emitted tables (core prefix stripped).
    pub name: String,
    /// Explicit numeric opcode, when the document provides one.
    pub opcode: Option<u32>,
    pub operands: Vec<OperandRef>,
    /// Required capabilities, in document order.
    pub capabilities: Vec<String>,
}

impl InstructionDef {
    /// Whether any operand has the given raw kind.
    pub fn has_operand_kind(&self, kind: &str) -> bool {
        self.operands.iter().any(|op| op.kind == kind)
    }
}

/// How many times an operand may appear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Quantifier {
    /// Exactly once.
    #[default]
    One,
    /// Zero or one time (`?`).
    Optional,
    /// Zero or more times (`*`).
    Variable,
}

impl Quantifier {
    /// Parse the grammar spelling of a quantifier.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "" => Some(Quantifier::One),
            "?" => Some(Quantifier::Optional),
            "*" => Some(Quantifier::Variable),
            _ => None,
        }
    }
}

/// A reference to an operand kind from an instruction or enumerant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperandRef {
    /// Raw kind name as written in the grammar.
    pub kind: String,
    pub quantifier: Quantifier,
}

impl OperandRef {
    pub fn new(kind: impl Into<String>, quantifier: Quantifier) -> Self {
        Self {
            kind: kind.into(),
            quantifier,
        }
    }
}

/// Category of an operand kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    ValueEnum,
    BitEnum,
    Id,
    Literal,
    Composite,
    /// Any other (or missing) category tag.
    Other(String),
}

impl Category {
    pub fn parse(text: &str) -> Self {
        match text {
            "ValueEnum" => Category::ValueEnum,
            "BitEnum" => Category::BitEnum,
            "Id" => Category::Id,
            "Literal" => Category::Literal,
            "Composite" => Category::Composite,
            other => Category::Other(other.to_string()),
        }
    }

    /// Whether kinds of this category carry enumerants.
    pub fn is_enum(&self) -> bool {
        matches!(self, Category::ValueEnum | Category::BitEnum)
    }
}

/// A named operand kind.
#[derive(Debug, Clone, PartialEq)]
pub struct OperandKindDef {
    pub kind: String,
    pub category: Category,
    /// Enumerants; always empty unless the category is an enum.
    pub enumerants: Vec<EnumerantDef>,
}

/// The value of an enumerant.
///
/// Bit-enum grammars spell values as hex strings; the spelling is kept so
/// tables reproduce it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub value: u32,
    pub spelling: String,
}

impl EnumValue {
    pub fn new(value: u32) -> Self {
        Self {
            value,
            spelling: value.to_string(),
        }
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spelling)
    }
}

/// One value of an enumerated operand kind.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumerantDef {
    pub name: String,
    pub value: EnumValue,
    pub capabilities: Vec<String>,
    pub extensions: Vec<String>,
    /// Operands that follow this enumerant in an instruction.
    pub parameters: Vec<OperandRef>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// All operand kinds with the given name.
    pub fn operand_kinds_named<'a>(
        &'a self,
        kind: &'a str,
    ) -> impl Iterator<Item = &'a OperandKindDef> + 'a {
        self.operand_kinds.iter().filter(move |k| k.kind == kind)
    }

    /// Operand kinds that carry enumerants, in document order.
    pub fn enum_kinds(&self) -> impl Iterator<Item = &OperandKindDef> {
        self.operand_kinds.iter().filter(|k| k.category.is_enum())
    }
}
