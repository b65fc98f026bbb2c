//! Mapping from grammar operand kinds to operand type tags.
//!
//! Tags are the names of the downstream operand type enumeration, e.g.
//! `IdRef` with quantifier `*` becomes `SPV_OPERAND_TYPE_VARIABLE_ID`.

use crate::ir::Quantifier;
use std::borrow::Cow;
use std::fmt;

/// Namespace every operand type tag lives in.
pub const TAG_NAMESPACE: &str = "SPV_OPERAND_TYPE_";

/// Raw kind of a result id operand.
pub const RESULT_ID_KIND: &str = "IdResult";

/// Raw kind of a result type operand.
pub const RESULT_TYPE_KIND: &str = "IdResultType";

/// A canonical operand type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperandTag(Cow<'static, str>);

impl OperandTag {
    /// Terminates operand lists of extended instructions.
    pub const NONE: OperandTag = OperandTag(Cow::Borrowed("SPV_OPERAND_TYPE_NONE"));

    /// A variable number of ids.
    pub const VARIABLE_ID: OperandTag = OperandTag(Cow::Borrowed("SPV_OPERAND_TYPE_VARIABLE_ID"));

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperandTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Grammar kinds whose internal name differs from the grammar name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenamedKind {
    IdResultType,
    IdResult,
    IdMemorySemantics,
    MemorySemantics,
    IdScope,
    Scope,
    IdRef,
    ImageOperands,
    Dim,
    ImageFormat,
    KernelEnqueueFlags,
    LiteralExtInstInteger,
    LiteralSpecConstantOpInteger,
    LiteralContextDependentNumber,
    PairLiteralIntegerIdRef,
    PairIdRefLiteralInteger,
    PairIdRefIdRef,
    FPRoundingMode,
    FPFastMathMode,
}

impl RenamedKind {
    fn parse(kind: &str) -> Option<Self> {
        Some(match kind {
            "IdResultType" => RenamedKind::IdResultType,
            "IdResult" => RenamedKind::IdResult,
            "IdMemorySemantics" => RenamedKind::IdMemorySemantics,
            "MemorySemantics" => RenamedKind::MemorySemantics,
            "IdScope" => RenamedKind::IdScope,
            "Scope" => RenamedKind::Scope,
            "IdRef" => RenamedKind::IdRef,
            "ImageOperands" => RenamedKind::ImageOperands,
            "Dim" => RenamedKind::Dim,
            "ImageFormat" => RenamedKind::ImageFormat,
            "KernelEnqueueFlags" => RenamedKind::KernelEnqueueFlags,
            "LiteralExtInstInteger" => RenamedKind::LiteralExtInstInteger,
            "LiteralSpecConstantOpInteger" => RenamedKind::LiteralSpecConstantOpInteger,
            "LiteralContextDependentNumber" => RenamedKind::LiteralContextDependentNumber,
            "PairLiteralIntegerIdRef" => RenamedKind::PairLiteralIntegerIdRef,
            "PairIdRefLiteralInteger" => RenamedKind::PairIdRefLiteralInteger,
            "PairIdRefIdRef" => RenamedKind::PairIdRefIdRef,
            "FPRoundingMode" => RenamedKind::FPRoundingMode,
            "FPFastMathMode" => RenamedKind::FPFastMathMode,
            _ => return None,
        })
    }

    fn internal_name(self) -> &'static str {
        match self {
            RenamedKind::IdResultType => "TypeId",
            RenamedKind::IdResult => "ResultId",
            RenamedKind::IdMemorySemantics | RenamedKind::MemorySemantics => "MemorySemanticsId",
            RenamedKind::IdScope | RenamedKind::Scope => "ScopeId",
            RenamedKind::IdRef => "Id",
            RenamedKind::ImageOperands => "Image",
            RenamedKind::Dim => "Dimensionality",
            RenamedKind::ImageFormat => "SamplerImageFormat",
            RenamedKind::KernelEnqueueFlags => "KernelEnqFlags",
            RenamedKind::LiteralExtInstInteger => "ExtensionInstructionNumber",
            RenamedKind::LiteralSpecConstantOpInteger => "SpecConstantOpNumber",
            RenamedKind::LiteralContextDependentNumber => "TypedLiteralNumber",
            RenamedKind::PairLiteralIntegerIdRef => "LiteralIntegerId",
            RenamedKind::PairIdRefLiteralInteger => "IdLiteralInteger",
            // Used by OpPhi; the pair is encoded as consecutive ids.
            RenamedKind::PairIdRefIdRef => "Id",
            RenamedKind::FPRoundingMode => "FpRoundingMode",
            RenamedKind::FPFastMathMode => "FpFastMathMode",
        }
    }
}

/// Canonical tag for a raw operand kind and quantifier. Never fails.
pub fn canonicalize(kind: &str, quantifier: Quantifier) -> OperandTag {
    let base = RenamedKind::parse(kind).map_or(kind, |k| k.internal_name());
    let marker = match quantifier {
        Quantifier::One => "",
        Quantifier::Optional => "Optional",
        Quantifier::Variable => "Variable",
    };
    OperandTag(Cow::Owned(mechanical_tag(&format!("{marker}{base}"))))
}

/// `OptionalImage` -> `SPV_OPERAND_TYPE_OPTIONAL_IMAGE`.
fn mechanical_tag(name: &str) -> String {
    let mut tag = String::with_capacity(TAG_NAMESPACE.len() + name.len() + 8);
    tag.push_str(TAG_NAMESPACE);
    let mut prev_lower = false;
    for c in name.chars() {
        if prev_lower && c.is_ascii_uppercase() {
            tag.push('_');
        }
        prev_lower = c.is_ascii_lowercase();
        tag.extend(c.to_uppercase());
    }
    tag
}
