//! Symbol/string tables for extensions and capabilities.

use crate::capability::{CapabilityEntry, CapabilityIndex};
use crate::ir::{Category, Grammar};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Symbol of an extension: its position in the sorted vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Extension(pub usize);

/// Every extension named by a value-enum enumerant, sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionVocabulary {
    names: Vec<String>,
    by_name: HashMap<String, Extension>,
}

impl ExtensionVocabulary {
    pub fn from_grammar(grammar: &Grammar) -> Self {
        let unique: BTreeSet<&str> = grammar
            .operand_kinds
            .iter()
            .filter(|k| k.category == Category::ValueEnum)
            .flat_map(|k| &k.enumerants)
            .flat_map(|e| &e.extensions)
            .map(String::as_str)
            .collect();

        let names: Vec<String> = unique.into_iter().map(String::from).collect();
        let by_name = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), Extension(i)))
            .collect();
        tracing::debug!(extensions = names.len(), "collected extension vocabulary");
        Self { names, by_name }
    }

    /// Extension names in symbol order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn symbols(&self) -> impl Iterator<Item = Extension> {
        (0..self.names.len()).map(Extension)
    }

    /// Name of a symbol; empty for symbols outside the vocabulary.
    pub fn name(&self, extension: Extension) -> &str {
        self.names.get(extension.0).map_or("", String::as_str)
    }

    pub fn lookup(&self, name: &str) -> Option<Extension> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A capability symbol as seen by the generated string table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilitySymbol {
    /// A capability, by value.
    Value(u32),
    /// The enumeration's maximum-value guard. Never names a capability.
    Max,
}

/// Capability names by value, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityStrings {
    entries: Vec<CapabilityEntry>,
}

impl CapabilityStrings {
    /// Aliases that repeat an earlier value are dropped; the first name wins.
    pub fn from_index(index: &CapabilityIndex) -> Self {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(index.len());
        for entry in index.entries() {
            if seen.insert(entry.value) {
                entries.push(entry.clone());
            } else {
                tracing::debug!(
                    capability = %entry.name,
                    value = entry.value,
                    "skipping capability alias"
                );
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[CapabilityEntry] {
        &self.entries
    }

    /// Name of a capability; empty for values no capability has.
    ///
    /// # Panics
    ///
    /// Panics on [`CapabilitySymbol::Max`]: correctly encoded tables never
    /// ask for the guard's name.
    pub fn name_of(&self, symbol: CapabilitySymbol) -> &str {
        match symbol {
            CapabilitySymbol::Max => {
                panic!("attempted to convert the capability maximum-value guard to a string")
            }
            CapabilitySymbol::Value(value) => self
                .entries
                .iter()
                .find(|e| e.value == value)
                .map_or("", |e| e.name.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_grammar;
    use crate::ir::GrammarFlavor;
    use serde_json::{Value, json};

    fn grammar(kinds: Value) -> Grammar {
        parse_grammar(
            &json!({ "instructions": [], "operand_kinds": kinds }),
            GrammarFlavor::Core,
        )
        .unwrap()
    }

    #[test]
    fn test_extensions_sorted_and_unique() {
        let grammar = grammar(json!([
            { "category": "ValueEnum", "kind": "Capability", "enumerants": [
                { "enumerant": "SubgroupBallotKHR", "value": 4423,
                  "extensions": ["SPV_KHR_shader_ballot"] },
                { "enumerant": "DrawParameters", "value": 4427,
                  "extensions": ["SPV_KHR_shader_draw_parameters", "SPV_KHR_shader_ballot"] }
            ]},
            { "category": "ValueEnum", "kind": "BuiltIn", "enumerants": [
                { "enumerant": "SubgroupEqMaskKHR", "value": 4416,
                  "extensions": ["SPV_AMD_gcn_shader", "SPV_KHR_shader_ballot"] }
            ]},
            { "category": "BitEnum", "kind": "MemoryAccess", "enumerants": [
                { "enumerant": "Volatile", "value": "0x0001", "extensions": ["SPV_BIT_ONLY"] }
            ]}
        ]));

        let vocab = ExtensionVocabulary::from_grammar(&grammar);
        assert_eq!(
            vocab.names(),
            [
                "SPV_AMD_gcn_shader",
                "SPV_KHR_shader_ballot",
                "SPV_KHR_shader_draw_parameters",
            ]
        );
    }

    #[test]
    fn test_extension_round_trip() {
        let grammar = grammar(json!([
            { "category": "ValueEnum", "kind": "Capability", "enumerants": [
                { "enumerant": "A", "value": 1, "extensions": ["SPV_B", "SPV_A"] }
            ]}
        ]));
        let vocab = ExtensionVocabulary::from_grammar(&grammar);
        for symbol in vocab.symbols() {
            assert_eq!(vocab.lookup(vocab.name(symbol)), Some(symbol));
        }
        assert_eq!(vocab.name(Extension(vocab.len())), "");
        assert_eq!(vocab.lookup("SPV_C"), None);
    }

    #[test]
    fn test_capability_strings_keep_declaration_order() {
        let grammar = grammar(json!([
            { "category": "ValueEnum", "kind": "Capability", "enumerants": [
                { "enumerant": "B", "value": 2 },
                { "enumerant": "A", "value": 1 },
                { "enumerant": "C", "value": 3 },
                { "enumerant": "AliasOfA", "value": 1 }
            ]}
        ]));
        let index = CapabilityIndex::from_grammar(&grammar).unwrap();
        let strings = CapabilityStrings::from_index(&index);

        let names: Vec<_> = strings.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["B", "A", "C"]);
        assert_eq!(strings.name_of(CapabilitySymbol::Value(1)), "A");
        assert_eq!(strings.name_of(CapabilitySymbol::Value(99)), "");
    }

    #[test]
    #[should_panic(expected = "maximum-value guard")]
    fn test_capability_max_guard_panics() {
        let grammar = grammar(json!([
            { "category": "ValueEnum", "kind": "Capability", "enumerants": [] }
        ]));
        let index = CapabilityIndex::from_grammar(&grammar).unwrap();
        CapabilityStrings::from_index(&index).name_of(CapabilitySymbol::Max);
    }
}
