//! JSON grammar to model parser.

use crate::error::{Error, GrammarFormatError};
use crate::ir::{
    Category, EnumValue, EnumerantDef, Grammar, GrammarFlavor, InstructionDef, OPNAME_PREFIX,
    OperandKindDef, OperandRef, Quantifier,
};
use serde_json::Value;
use std::path::Path;

/// Read and parse a grammar file.
pub fn load_grammar(path: &Path, flavor: GrammarFlavor) -> Result<Grammar, Error> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let grammar = parse_grammar_str(&text, flavor)?;
    tracing::debug!(
        path = %path.display(),
        instructions = grammar.instructions.len(),
        operand_kinds = grammar.operand_kinds.len(),
        "loaded grammar"
    );
    Ok(grammar)
}

/// Parse grammar text.
pub fn parse_grammar_str(text: &str, flavor: GrammarFlavor) -> Result<Grammar, GrammarFormatError> {
    let value: Value = serde_json::from_str(text)?;
    parse_grammar(&value, flavor)
}

/// Parse an already decoded grammar document.
pub fn parse_grammar(input: &Value, flavor: GrammarFlavor) -> Result<Grammar, GrammarFormatError> {
    let instructions = input
        .get("instructions")
        .and_then(|v| v.as_array())
        .ok_or(GrammarFormatError::MissingArray("instructions"))?;
    let operand_kinds = input
        .get("operand_kinds")
        .and_then(|v| v.as_array())
        .ok_or(GrammarFormatError::MissingArray("operand_kinds"))?;

    let mut grammar = Grammar::new();
    for (index, inst) in instructions.iter().enumerate() {
        grammar
            .instructions
            .push(parse_instruction(index, inst, flavor)?);
    }
    for (index, kind) in operand_kinds.iter().enumerate() {
        grammar.operand_kinds.push(parse_operand_kind(index, kind)?);
    }
    Ok(grammar)
}

fn parse_instruction(
    index: usize,
    inst: &Value,
    flavor: GrammarFlavor,
) -> Result<InstructionDef, GrammarFormatError> {
    let opname = required_str(inst, "opname", || format!("instruction #{index}"))?;
    let context = || format!("instruction `{opname}`");

    let name = match flavor {
        GrammarFlavor::Core => opname
            .strip_prefix(OPNAME_PREFIX)
            .ok_or_else(|| GrammarFormatError::MissingPrefix {
                opname: opname.to_string(),
                prefix: OPNAME_PREFIX,
            })?
            .to_string(),
        GrammarFlavor::ExtendedInstructionSet => opname.to_string(),
    };

    let opcode = match inst.get("opcode") {
        Some(v) => Some(parse_u32(v, "opcode", &context)?),
        None if flavor == GrammarFlavor::ExtendedInstructionSet => {
            return Err(GrammarFormatError::MissingField {
                context: context(),
                field: "opcode",
            });
        }
        None => None,
    };

    Ok(InstructionDef {
        opname: opname.to_string(),
        name,
        opcode,
        operands: parse_operands(inst, "operands", &context)?,
        capabilities: string_list(inst, "capabilities"),
    })
}

fn parse_operand_kind(index: usize, kind: &Value) -> Result<OperandKindDef, GrammarFormatError> {
    let name = required_str(kind, "kind", || format!("operand kind #{index}"))?;
    let category = Category::parse(kind.get("category").and_then(|c| c.as_str()).unwrap_or(""));

    let mut enumerants = Vec::new();
    if category.is_enum() {
        if let Some(items) = kind.get("enumerants").and_then(|e| e.as_array()) {
            for (i, item) in items.iter().enumerate() {
                enumerants.push(parse_enumerant(name, i, item)?);
            }
        }
    }

    Ok(OperandKindDef {
        kind: name.to_string(),
        category,
        enumerants,
    })
}

fn parse_enumerant(
    kind: &str,
    index: usize,
    item: &Value,
) -> Result<EnumerantDef, GrammarFormatError> {
    let name = required_str(item, "enumerant", || {
        format!("enumerant #{index} of `{kind}`")
    })?;
    let context = || format!("enumerant `{name}` of `{kind}`");
    let value = item.get("value").ok_or_else(|| GrammarFormatError::MissingField {
        context: context(),
        field: "value",
    })?;

    let mut parameters = parse_operands(item, "parameters", &context)?;
    // Enumerant parameters are always single operands.
    for param in &mut parameters {
        param.quantifier = Quantifier::One;
    }

    Ok(EnumerantDef {
        name: name.to_string(),
        value: parse_enum_value(value, &context)?,
        capabilities: string_list(item, "capabilities"),
        extensions: string_list(item, "extensions"),
        parameters,
    })
}

fn parse_operands(
    parent: &Value,
    field: &str,
    context: &dyn Fn() -> String,
) -> Result<Vec<OperandRef>, GrammarFormatError> {
    let Some(items) = parent.get(field).and_then(|o| o.as_array()) else {
        return Ok(Vec::new());
    };

    items
        .iter()
        .enumerate()
        .map(|(i, op)| -> Result<OperandRef, GrammarFormatError> {
            let kind = required_str(op, "kind", || format!("{}, operand #{i}", context()))?;
            let text = op.get("quantifier").and_then(|q| q.as_str()).unwrap_or("");
            let quantifier =
                Quantifier::parse(text).ok_or_else(|| GrammarFormatError::UnknownQuantifier {
                    context: format!("{}, operand #{i}", context()),
                    quantifier: text.to_string(),
                })?;
            Ok(OperandRef::new(kind, quantifier))
        })
        .collect()
}

fn required_str<'a>(
    obj: &'a Value,
    field: &'static str,
    context: impl FnOnce() -> String,
) -> Result<&'a str, GrammarFormatError> {
    obj.get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| GrammarFormatError::MissingField {
            context: context(),
            field,
        })
}

fn string_list(obj: &Value, field: &str) -> Vec<String> {
    obj.get(field)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_u32(
    value: &Value,
    field: &'static str,
    context: &dyn Fn() -> String,
) -> Result<u32, GrammarFormatError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| GrammarFormatError::InvalidValue {
            context: context(),
            field,
            value: value.to_string(),
        })
}

fn parse_enum_value(
    value: &Value,
    context: &dyn Fn() -> String,
) -> Result<EnumValue, GrammarFormatError> {
    if let Some(text) = value.as_str() {
        let parsed = match text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
        {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => text.parse::<u32>().ok(),
        };
        return parsed
            .map(|n| EnumValue {
                value: n,
                spelling: text.to_string(),
            })
            .ok_or_else(|| GrammarFormatError::InvalidValue {
                context: context(),
                field: "value",
                value: value.to_string(),
            });
    }
    parse_u32(value, "value", context).map(EnumValue::new)
}
