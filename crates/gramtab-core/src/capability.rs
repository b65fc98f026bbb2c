//! Capability vocabulary and requirement encodings.

use crate::error::SchemaError;
use crate::ir::{CAPABILITY_KIND, Grammar};
use serde::Deserialize;
use std::collections::HashMap;

/// Width of the legacy capability mask.
pub const MASK_WIDTH: u32 = u64::BITS;

/// How a capability requirement is written into tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityEncoding {
    /// Order-preserving list of capability symbols.
    #[default]
    List,
    /// Legacy bit mask keyed by capability value.
    ///
    /// Only usable while every capability value is below [`MASK_WIDTH`];
    /// grammars with larger values must use [`CapabilityEncoding::List`].
    Mask,
}

/// An encoded capability requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capabilities {
    List(Vec<String>),
    Mask(u64),
}

impl Capabilities {
    pub fn is_empty(&self) -> bool {
        match self {
            Capabilities::List(names) => names.is_empty(),
            Capabilities::Mask(mask) => *mask == 0,
        }
    }
}

/// A declared capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityEntry {
    pub name: String,
    pub value: u32,
}

/// The enumerants of the grammar's `Capability` kind, in declaration order.
#[derive(Debug, Clone)]
pub struct CapabilityIndex {
    entries: Vec<CapabilityEntry>,
    by_name: HashMap<String, usize>,
}

impl CapabilityIndex {
    /// Build the index from the single `Capability` operand kind of a grammar.
    pub fn from_grammar(grammar: &Grammar) -> Result<Self, SchemaError> {
        let mut kinds = grammar.operand_kinds_named(CAPABILITY_KIND);
        let kind = kinds.next().ok_or(SchemaError::MissingCapabilityKind)?;
        let extra = kinds.count();
        if extra > 0 {
            return Err(SchemaError::DuplicateCapabilityKind(extra + 1));
        }

        let entries: Vec<CapabilityEntry> = kind
            .enumerants
            .iter()
            .map(|e| CapabilityEntry {
                name: e.name.clone(),
                value: e.value.value,
            })
            .collect();

        let mut by_name = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            by_name.entry(entry.name.clone()).or_insert(i);
        }

        tracing::debug!(capabilities = entries.len(), "indexed capabilities");
        Ok(Self { entries, by_name })
    }

    /// Capabilities in declaration order.
    pub fn entries(&self) -> &[CapabilityEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn value_of(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).map(|&i| self.entries[i].value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode a requirement list.
    pub fn encode(
        &self,
        caps: &[String],
        encoding: CapabilityEncoding,
    ) -> Result<Capabilities, SchemaError> {
        match encoding {
            CapabilityEncoding::List => {
                for cap in caps.iter().filter(|c| !self.contains(c)) {
                    tracing::warn!(capability = %cap, "capability is not declared by the grammar");
                }
                Ok(Capabilities::List(caps.to_vec()))
            }
            CapabilityEncoding::Mask => self.mask(caps).map(Capabilities::Mask),
        }
    }

    fn mask(&self, caps: &[String]) -> Result<u64, SchemaError> {
        if self.entries.len() > MASK_WIDTH as usize {
            return Err(SchemaError::MaskCapacity {
                count: self.entries.len(),
                width: MASK_WIDTH,
            });
        }

        caps.iter().try_fold(0u64, |mask, cap| {
            let bit = self
                .value_of(cap)
                .ok_or_else(|| SchemaError::UnknownCapability(cap.clone()))?;
            if bit >= MASK_WIDTH {
                return Err(SchemaError::MaskOverflow {
                    name: cap.clone(),
                    bit,
                    width: MASK_WIDTH,
                });
            }
            Ok(mask | (1u64 << bit))
        })
    }
}
