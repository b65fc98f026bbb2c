//! Enumerant block and operand group table rendering.

use super::{render_capabilities, render_extensions, render_tags};
use crate::options::TableOptions;
use crate::tables::{EnumerantBlock, EnumerantRow, OperandKindTable};
use crate::traits::{Fragment, FragmentKind};

impl Fragment for OperandKindTable {
    fn kind(&self) -> FragmentKind {
        FragmentKind::OperandKinds
    }

    fn render(&self, options: &TableOptions) -> String {
        let mut sections: Vec<String> = self
            .blocks
            .iter()
            .map(|block| render_block(block, options))
            .collect();

        let groups: Vec<String> = self
            .groups
            .iter()
            .map(|group| {
                let array = entries_name(self.block(group), options);
                format!("  {{{}, ARRAY_SIZE({array}), {array}}}", group.tag)
            })
            .collect();
        sections.push(format!(
            "static const spv_operand_desc_group_t {}_OperandInfoTable[] = {{\n{}\n}};",
            options.variable_prefix,
            groups.join(",\n")
        ));

        format!("{}\n", sections.join("\n\n"))
    }
}

fn entries_name(block: &EnumerantBlock, options: &TableOptions) -> String {
    format!("{}_{}Entries", options.variable_prefix, block.kind)
}

fn render_block(block: &EnumerantBlock, options: &TableOptions) -> String {
    let header = format!(
        "static const spv_operand_desc_t {}[] = {{",
        entries_name(block, options)
    );
    if block.entries.is_empty() {
        return format!("{header}\n}};");
    }
    let rows: Vec<String> = block
        .entries
        .iter()
        .map(|row| format!("  {}", render_row(row, options)))
        .collect();
    format!("{header}\n{}\n}};", rows.join(",\n"))
}

fn render_row(row: &EnumerantRow, options: &TableOptions) -> String {
    format!(
        "{{\"{}\", {}, {}, {}, {}}}",
        row.name,
        row.value,
        render_capabilities(&row.capabilities, options),
        render_extensions(&row.extensions, options),
        render_tags(&row.parameters),
    )
}
