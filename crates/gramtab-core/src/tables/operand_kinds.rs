//! Enumerant and operand group descriptor tables.

use crate::canonical::{OperandTag, canonicalize};
use crate::capability::{Capabilities, CapabilityIndex};
use crate::error::Result;
use crate::ir::{EnumValue, Grammar, OperandKindDef, Quantifier};
use crate::options::TableOptions;

/// Kinds that are also looked up through their `Optional` tag.
pub const OPTIONAL_ALIAS_KINDS: [&str; 3] = ["ImageOperands", "AccessQualifier", "MemoryAccess"];

/// One enumerant descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerantRow {
    pub name: String,
    pub value: EnumValue,
    pub capabilities: Capabilities,
    pub extensions: Vec<String>,
    pub parameters: Vec<OperandTag>,
}

/// The enumerant descriptors of one operand kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerantBlock {
    pub kind: String,
    pub entries: Vec<EnumerantRow>,
}

/// A group table row: an operand tag and the block describing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRow {
    pub tag: OperandTag,
    /// Index into [`OperandKindTable::blocks`].
    pub block: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperandKindTable {
    /// One block per enumerated kind, in grammar order.
    pub blocks: Vec<EnumerantBlock>,
    /// Base rows in block order, then the optional aliases.
    pub groups: Vec<GroupRow>,
}

impl OperandKindTable {
    pub fn block(&self, row: &GroupRow) -> &EnumerantBlock {
        &self.blocks[row.block]
    }

    /// Group rows with the given tag.
    pub fn groups_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a GroupRow> + 'a {
        self.groups.iter().filter(move |g| g.tag.as_str() == tag)
    }
}

/// Build the enumerant blocks and group table for every enumerated kind.
pub fn build_operand_kind_table(
    grammar: &Grammar,
    caps: &CapabilityIndex,
    options: &TableOptions,
) -> Result<OperandKindTable> {
    let blocks = grammar
        .enum_kinds()
        .map(|kind| build_block(kind, caps, options))
        .collect::<Result<Vec<_>>>()?;

    let mut groups: Vec<GroupRow> = blocks
        .iter()
        .enumerate()
        .map(|(block, b)| GroupRow {
            tag: canonicalize(&b.kind, Quantifier::One),
            block,
        })
        .collect();

    let aliases: Vec<GroupRow> = blocks
        .iter()
        .enumerate()
        .filter(|(_, b)| OPTIONAL_ALIAS_KINDS.contains(&b.kind.as_str()))
        .map(|(block, b)| GroupRow {
            tag: canonicalize(&b.kind, Quantifier::Optional),
            block,
        })
        .collect();
    if aliases.len() < OPTIONAL_ALIAS_KINDS.len() {
        tracing::debug!(
            found = aliases.len(),
            "grammar lacks some kinds that have optional aliases"
        );
    }
    groups.extend(aliases);

    tracing::debug!(
        blocks = blocks.len(),
        groups = groups.len(),
        "built operand kind table"
    );
    Ok(OperandKindTable { blocks, groups })
}

fn build_block(
    kind: &OperandKindDef,
    caps: &CapabilityIndex,
    options: &TableOptions,
) -> Result<EnumerantBlock> {
    let entries = kind
        .enumerants
        .iter()
        .map(|e| -> Result<EnumerantRow> {
            Ok(EnumerantRow {
                name: e.name.clone(),
                value: e.value.clone(),
                capabilities: caps.encode(&e.capabilities, options.capability_encoding)?,
                extensions: e.extensions.clone(),
                parameters: e
                    .parameters
                    .iter()
                    .map(|p| canonicalize(&p.kind, Quantifier::One))
                    .collect(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(EnumerantBlock {
        kind: kind.kind.clone(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_grammar;
    use crate::ir::GrammarFlavor;
    use serde_json::{Value, json};

    fn table(kinds: Value) -> OperandKindTable {
        let grammar = parse_grammar(
            &json!({ "instructions": [], "operand_kinds": kinds }),
            GrammarFlavor::Core,
        )
        .unwrap();
        let caps = CapabilityIndex::from_grammar(&grammar).unwrap();
        build_operand_kind_table(&grammar, &caps, &TableOptions::default()).unwrap()
    }

    fn grammar_kinds() -> Value {
        json!([
            { "category": "BitEnum", "kind": "ImageOperands", "enumerants": [
                { "enumerant": "None", "value": "0x0000" },
                { "enumerant": "Bias", "value": "0x0001", "capabilities": ["Shader"],
                  "parameters": [{ "kind": "IdRef" }] }
            ]},
            { "category": "ValueEnum", "kind": "Dim", "enumerants": [
                { "enumerant": "1D", "value": 0 }
            ]},
            { "category": "Id", "kind": "IdRef" },
            { "category": "ValueEnum", "kind": "AccessQualifier", "enumerants": [
                { "enumerant": "ReadOnly", "value": 0 }
            ]},
            { "category": "BitEnum", "kind": "MemoryAccess", "enumerants": [
                { "enumerant": "Volatile", "value": "0x0001" },
                { "enumerant": "Aligned", "value": "0x0002",
                  "parameters": [{ "kind": "LiteralInteger" }] }
            ]},
            { "category": "ValueEnum", "kind": "Capability", "enumerants": [
                { "enumerant": "Shader", "value": 1 }
            ]}
        ])
    }

    #[test]
    fn test_blocks_follow_grammar_order() {
        let table = table(grammar_kinds());
        let kinds: Vec<_> = table.blocks.iter().map(|b| b.kind.as_str()).collect();
        assert_eq!(
            kinds,
            ["ImageOperands", "Dim", "AccessQualifier", "MemoryAccess", "Capability"]
        );

        let bias = &table.blocks[0].entries[1];
        assert_eq!(bias.value.to_string(), "0x0001");
        assert_eq!(bias.capabilities, Capabilities::List(vec!["Shader".into()]));
        assert_eq!(bias.parameters, [canonicalize("IdRef", Quantifier::One)]);
    }

    #[test]
    fn test_optional_aliases_share_blocks() {
        let table = table(grammar_kinds());
        assert_eq!(table.groups.len(), 8);

        for kind in OPTIONAL_ALIAS_KINDS {
            let base = canonicalize(kind, Quantifier::One);
            let optional = canonicalize(kind, Quantifier::Optional);
            let base_rows: Vec<_> = table.groups_tagged(base.as_str()).collect();
            let optional_rows: Vec<_> = table.groups_tagged(optional.as_str()).collect();
            assert_eq!(base_rows.len(), 1, "{kind}");
            assert_eq!(optional_rows.len(), 1, "{kind}");
            assert_eq!(base_rows[0].block, optional_rows[0].block);
            assert_eq!(table.block(base_rows[0]).entries, table.block(optional_rows[0]).entries);
        }

        let tags: Vec<_> = table.groups[5..].iter().map(|g| g.tag.as_str()).collect();
        assert_eq!(
            tags,
            [
                "SPV_OPERAND_TYPE_OPTIONAL_IMAGE",
                "SPV_OPERAND_TYPE_OPTIONAL_ACCESS_QUALIFIER",
                "SPV_OPERAND_TYPE_OPTIONAL_MEMORY_ACCESS",
            ]
        );
    }

    #[test]
    fn test_empty_encodings_for_plain_enumerant() {
        let table = table(json!([
            { "category": "ValueEnum", "kind": "Capability", "enumerants": [
                { "enumerant": "Shader", "value": 1 }
            ]}
        ]));
        let shader = &table.blocks[0].entries[0];
        assert!(shader.capabilities.is_empty());
        assert!(shader.extensions.is_empty());
        assert!(shader.parameters.is_empty());
    }

    #[test]
    fn test_missing_alias_kinds_are_skipped() {
        let table = table(json!([
            { "category": "ValueEnum", "kind": "Capability", "enumerants": [] },
            { "category": "BitEnum", "kind": "MemoryAccess", "enumerants": [] }
        ]));
        let tags: Vec<_> = table.groups.iter().map(|g| g.tag.as_str()).collect();
        assert_eq!(
            tags,
            [
                "SPV_OPERAND_TYPE_CAPABILITY",
                "SPV_OPERAND_TYPE_MEMORY_ACCESS",
                "SPV_OPERAND_TYPE_OPTIONAL_MEMORY_ACCESS",
            ]
        );
    }
}
