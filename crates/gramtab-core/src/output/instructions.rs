//! Opcode descriptor rendering.

use super::{render_capabilities, render_tags};
use crate::ir::GrammarFlavor;
use crate::options::TableOptions;
use crate::tables::{InstructionRow, InstructionTable, Opcode};
use crate::traits::{Fragment, FragmentKind};

impl Fragment for InstructionTable {
    fn kind(&self) -> FragmentKind {
        match self.flavor {
            GrammarFlavor::Core => FragmentKind::CoreInstructions,
            GrammarFlavor::ExtendedInstructionSet => FragmentKind::ExtInstructions,
        }
    }

    fn render(&self, options: &TableOptions) -> String {
        let rows: Vec<String> = self
            .rows
            .iter()
            .map(|row| match self.flavor {
                GrammarFlavor::Core => core_row(row, options),
                GrammarFlavor::ExtendedInstructionSet => ext_row(row, options),
            })
            .collect();
        format!("{}\n", rows.join(",\n"))
    }
}

fn opcode(row: &InstructionRow) -> String {
    match &row.opcode {
        Opcode::Symbol(symbol) => symbol.clone(),
        Opcode::Number(n) => n.to_string(),
    }
}

fn core_row(row: &InstructionRow, options: &TableOptions) -> String {
    format!(
        "{{\"{}\", {}, {}, {}, {}, {}, {}}}",
        row.name,
        opcode(row),
        render_capabilities(&row.capabilities, options),
        row.operand_count(),
        render_tags(&row.operands),
        u8::from(row.def_result_id),
        u8::from(row.ref_type_id),
    )
}

fn ext_row(row: &InstructionRow, options: &TableOptions) -> String {
    format!(
        "{{\"{}\", {}, {}, {}}}",
        row.name,
        opcode(row),
        render_capabilities(&row.capabilities, options),
        render_tags(&row.operands),
    )
}
