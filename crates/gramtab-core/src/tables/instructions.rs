//! Opcode descriptor tables.

use crate::canonical::{OperandTag, RESULT_ID_KIND, RESULT_TYPE_KIND, canonicalize};
use crate::capability::{Capabilities, CapabilityIndex};
use crate::error::{GrammarFormatError, Result};
use crate::ir::{Grammar, GrammarFlavor, InstructionDef};
use crate::options::TableOptions;
use std::collections::HashSet;

/// Display name of the instruction that calls into an extended instruction set.
pub const EXT_INST_NAME: &str = "ExtInst";

/// How a row refers to its opcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opcode {
    /// Symbolic opcode, e.g. `SpvOpNop`.
    Symbol(String),
    /// Explicit numeric opcode of an extended instruction.
    Number(u32),
}

/// One opcode descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRow {
    pub name: String,
    pub opcode: Opcode,
    pub capabilities: Capabilities,
    pub operands: Vec<OperandTag>,
    /// Whether the instruction defines a result id.
    pub def_result_id: bool,
    /// Whether the instruction references a result type.
    pub ref_type_id: bool,
}

impl InstructionRow {
    pub fn operand_count(&self) -> usize {
        self.operands.len()
    }
}

/// Opcode descriptors in grammar order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionTable {
    pub flavor: GrammarFlavor,
    pub rows: Vec<InstructionRow>,
}

/// Build the descriptor table of the core instruction set.
pub fn build_instruction_table(
    grammar: &Grammar,
    caps: &CapabilityIndex,
    options: &TableOptions,
) -> Result<InstructionTable> {
    warn_duplicate_names(grammar);
    let rows = grammar
        .instructions
        .iter()
        .map(|inst| -> Result<InstructionRow> {
            let opcode = Opcode::Symbol(options.opcode_symbol(&inst.name));
            let mut row = build_row(inst, caps, options, opcode)?;
            drop_ext_inst_variable_ids(&row.name, &mut row.operands);
            Ok(row)
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(rows = rows.len(), "built core instruction table");
    Ok(InstructionTable {
        flavor: GrammarFlavor::Core,
        rows,
    })
}

/// Build the descriptor table of an extended instruction set.
///
/// Operand lists are terminated with [`OperandTag::NONE`].
pub fn build_ext_inst_table(
    grammar: &Grammar,
    caps: &CapabilityIndex,
    options: &TableOptions,
) -> Result<InstructionTable> {
    warn_duplicate_names(grammar);
    let rows = grammar
        .instructions
        .iter()
        .map(|inst| -> Result<InstructionRow> {
            let opcode = inst.opcode.ok_or_else(|| GrammarFormatError::MissingField {
                context: format!("instruction `{}`", inst.opname),
                field: "opcode",
            })?;
            let mut row = build_row(inst, caps, options, Opcode::Number(opcode))?;
            row.operands.push(OperandTag::NONE);
            Ok(row)
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(rows = rows.len(), "built extended instruction table");
    Ok(InstructionTable {
        flavor: GrammarFlavor::ExtendedInstructionSet,
        rows,
    })
}

fn build_row(
    inst: &InstructionDef,
    caps: &CapabilityIndex,
    options: &TableOptions,
    opcode: Opcode,
) -> Result<InstructionRow> {
    Ok(InstructionRow {
        name: inst.name.clone(),
        opcode,
        capabilities: caps.encode(&inst.capabilities, options.capability_encoding)?,
        operands: inst
            .operands
            .iter()
            .map(|op| canonicalize(&op.kind, op.quantifier))
            .collect(),
        def_result_id: inst.has_operand_kind(RESULT_ID_KIND),
        ref_type_id: inst.has_operand_kind(RESULT_TYPE_KIND),
    })
}

/// The grammar gives `OpExtInst` a trailing `IdRef*`, but the extended
/// instruction's own operands are described by its instruction set.
fn drop_ext_inst_variable_ids(name: &str, operands: &mut Vec<OperandTag>) {
    if name == EXT_INST_NAME && operands.last() == Some(&OperandTag::VARIABLE_ID) {
        operands.pop();
    }
}

fn warn_duplicate_names(grammar: &Grammar) {
    let mut seen = HashSet::new();
    for inst in &grammar.instructions {
        if !seen.insert(inst.opname.as_str()) {
            tracing::warn!(opname = %inst.opname, "instruction is defined more than once");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CapabilityEncoding;
    use crate::input::parse_grammar;
    use serde_json::{Value, json};

    fn capability_kind() -> Value {
        json!({
            "category": "ValueEnum",
            "kind": "Capability",
            "enumerants": [
                { "enumerant": "Matrix", "value": 0 },
                { "enumerant": "Shader", "value": 1 },
                { "enumerant": "Addresses", "value": 4 }
            ]
        })
    }

    fn core_table(instructions: Value, options: &TableOptions) -> Result<InstructionTable> {
        let grammar = parse_grammar(
            &json!({ "instructions": instructions, "operand_kinds": [capability_kind()] }),
            GrammarFlavor::Core,
        )?;
        let caps = CapabilityIndex::from_grammar(&grammar)?;
        build_instruction_table(&grammar, &caps, options)
    }

    fn tags(row: &InstructionRow) -> Vec<&str> {
        row.operands.iter().map(|t| t.as_str()).collect()
    }

    #[test]
    fn test_ext_inst_row() {
        let table = core_table(
            json!([{
                "opname": "OpExtInst",
                "operands": [
                    { "kind": "IdResultType" },
                    { "kind": "IdResult" },
                    { "kind": "IdRef" },
                    { "kind": "LiteralExtInstInteger" },
                    { "kind": "IdRef", "quantifier": "*" }
                ]
            }]),
            &TableOptions::default(),
        )
        .unwrap();

        let row = &table.rows[0];
        assert_eq!(row.name, "ExtInst");
        assert_eq!(row.opcode, Opcode::Symbol("SpvOpExtInst".into()));
        assert_eq!(row.operand_count(), 4);
        assert!(row.ref_type_id);
        assert!(row.def_result_id);
        assert_eq!(
            tags(row),
            [
                "SPV_OPERAND_TYPE_TYPE_ID",
                "SPV_OPERAND_TYPE_RESULT_ID",
                "SPV_OPERAND_TYPE_ID",
                "SPV_OPERAND_TYPE_EXTENSION_INSTRUCTION_NUMBER",
            ]
        );
    }

    #[test]
    fn test_ext_inst_fixup_requires_variable_id_tail() {
        let table = core_table(
            json!([{
                "opname": "OpExtInst",
                "operands": [
                    { "kind": "IdResult" },
                    { "kind": "LiteralInteger", "quantifier": "*" }
                ]
            }]),
            &TableOptions::default(),
        )
        .unwrap();
        assert_eq!(
            tags(&table.rows[0]),
            ["SPV_OPERAND_TYPE_RESULT_ID", "SPV_OPERAND_TYPE_VARIABLE_LITERAL_INTEGER"]
        );
    }

    #[test]
    fn test_fixup_only_applies_to_ext_inst() {
        let table = core_table(
            json!([{
                "opname": "OpFunctionCall",
                "operands": [
                    { "kind": "IdResultType" },
                    { "kind": "IdResult" },
                    { "kind": "IdRef" },
                    { "kind": "IdRef", "quantifier": "*" }
                ]
            }]),
            &TableOptions::default(),
        )
        .unwrap();
        let row = &table.rows[0];
        assert_eq!(row.operand_count(), 4);
        assert_eq!(row.operands.last(), Some(&OperandTag::VARIABLE_ID));
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let table = core_table(
            json!([
                { "opname": "OpNop" },
                { "opname": "OpUndef", "operands": [{ "kind": "IdResultType" }, { "kind": "IdResult" }] },
                { "opname": "OpNop" }
            ]),
            &TableOptions::default(),
        )
        .unwrap();
        let names: Vec<_> = table.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Nop", "Undef", "Nop"]);
        assert!(!table.rows[0].def_result_id && !table.rows[0].ref_type_id);
        for row in &table.rows {
            assert_eq!(row.operand_count(), row.operands.len());
        }
    }

    #[test]
    fn test_capability_encodings() {
        let insts = json!([{ "opname": "OpConvertPtrToU", "capabilities": ["Addresses", "Shader"] }]);

        let table = core_table(insts.clone(), &TableOptions::default()).unwrap();
        assert_eq!(
            table.rows[0].capabilities,
            Capabilities::List(vec!["Addresses".into(), "Shader".into()])
        );

        let mask = TableOptions {
            capability_encoding: CapabilityEncoding::Mask,
            ..Default::default()
        };
        let table = core_table(insts, &mask).unwrap();
        assert_eq!(table.rows[0].capabilities, Capabilities::Mask(0x12));
    }

    #[test]
    fn test_ext_inst_set_rows() {
        let core = parse_grammar(
            &json!({ "instructions": [], "operand_kinds": [capability_kind()] }),
            GrammarFlavor::Core,
        )
        .unwrap();
        let caps = CapabilityIndex::from_grammar(&core).unwrap();
        let glsl = parse_grammar(
            &json!({
                "instructions": [
                    { "opname": "Round", "opcode": 1, "operands": [{ "kind": "IdRef" }] },
                    { "opname": "Modf", "opcode": 35, "capabilities": ["Shader"],
                      "operands": [{ "kind": "IdRef" }, { "kind": "IdRef", "quantifier": "*" }] },
                    { "opname": "ExtInst", "opcode": 2, "operands": [{ "kind": "IdRef", "quantifier": "*" }] }
                ],
                "operand_kinds": []
            }),
            GrammarFlavor::ExtendedInstructionSet,
        )
        .unwrap();

        let table = build_ext_inst_table(&glsl, &caps, &TableOptions::default()).unwrap();
        assert_eq!(table.flavor, GrammarFlavor::ExtendedInstructionSet);
        assert_eq!(table.rows[0].opcode, Opcode::Number(1));
        assert_eq!(tags(&table.rows[0]), ["SPV_OPERAND_TYPE_ID", "SPV_OPERAND_TYPE_NONE"]);
        assert_eq!(table.rows[1].operand_count(), 3);
        assert_eq!(table.rows[1].operands.last(), Some(&OperandTag::NONE));
        // No fixup outside the core set.
        assert_eq!(
            tags(&table.rows[2]),
            ["SPV_OPERAND_TYPE_VARIABLE_ID", "SPV_OPERAND_TYPE_NONE"]
        );
    }

    #[test]
    fn test_ext_table_requires_opcodes() {
        let grammar = parse_grammar(
            &json!({ "instructions": [{ "opname": "OpNop" }], "operand_kinds": [capability_kind()] }),
            GrammarFlavor::Core,
        )
        .unwrap();
        let caps = CapabilityIndex::from_grammar(&grammar).unwrap();
        assert!(build_ext_inst_table(&grammar, &caps, &TableOptions::default()).is_err());
    }
}
