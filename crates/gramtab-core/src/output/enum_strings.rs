//! Extension and capability string table rendering.

use crate::options::TableOptions;
use crate::tables::{CapabilityStrings, ExtensionVocabulary};
use crate::traits::{Fragment, FragmentKind};
use std::fmt::Write;

/// Body of the extension enumeration.
pub struct ExtensionEnum<'a>(pub &'a ExtensionVocabulary);

/// `ExtensionToString` and `GetExtensionFromString`.
pub struct ExtensionStringTables<'a>(pub &'a ExtensionVocabulary);

/// `CapabilityToString`, guarded against the maximum-value symbol.
pub struct CapabilityStringTable<'a>(pub &'a CapabilityStrings);

impl Fragment for ExtensionEnum<'_> {
    fn kind(&self) -> FragmentKind {
        FragmentKind::ExtensionEnum
    }

    fn render(&self, options: &TableOptions) -> String {
        let names: Vec<String> = self
            .0
            .names()
            .iter()
            .map(|name| options.extension_enumerator(name))
            .collect();
        format!("{}\n", names.join(",\n"))
    }
}

impl Fragment for ExtensionStringTables<'_> {
    fn kind(&self) -> FragmentKind {
        FragmentKind::ExtensionStrings
    }

    fn render(&self, options: &TableOptions) -> String {
        let ty = &options.extension_type;
        let mut out = String::new();

        let _ = writeln!(out, "const char* ExtensionToString({ty} extension) {{");
        out.push_str("  switch (extension) {\n");
        for name in self.0.names() {
            let _ = writeln!(out, "    case {}:", options.extension_symbol(name));
            let _ = writeln!(out, "      return \"{name}\";");
        }
        out.push_str("  };\n\n  return \"\";\n}\n\n");

        let _ = writeln!(
            out,
            "bool GetExtensionFromString(const std::string& str, {ty}* extension) {{"
        );
        let _ = writeln!(
            out,
            "  static const std::unordered_map<std::string, {ty}> mapping = {{"
        );
        let entries: Vec<String> = self
            .0
            .names()
            .iter()
            .map(|name| format!("    {{\"{name}\", {}}}", options.extension_symbol(name)))
            .collect();
        if !entries.is_empty() {
            out.push_str(&entries.join(",\n"));
            out.push('\n');
        }
        out.push_str("  };\n\n");
        out.push_str("  const auto it = mapping.find(str);\n\n");
        out.push_str("  if (it == mapping.end()) return false;\n\n");
        out.push_str("  *extension = it->second;\n");
        out.push_str("  return true;\n}\n");
        out
    }
}

impl Fragment for CapabilityStringTable<'_> {
    fn kind(&self) -> FragmentKind {
        FragmentKind::CapabilityStrings
    }

    fn render(&self, options: &TableOptions) -> String {
        let ty = &options.capability_type;
        let max = options.capability_symbol("Max");
        let mut out = String::new();

        let _ = writeln!(out, "const char* CapabilityToString({ty} capability) {{");
        out.push_str("  switch (capability) {\n");
        for entry in self.0.entries() {
            let _ = writeln!(out, "    case {}:", options.capability_symbol(&entry.name));
            let _ = writeln!(out, "      return \"{}\";", entry.name);
        }
        let _ = writeln!(out, "    case {max}:");
        let _ = writeln!(
            out,
            "      assert(0 && \"Attempting to convert {max} to string\");"
        );
        out.push_str("      return \"\";\n");
        out.push_str("  };\n\n  return \"\";\n}\n");
        out
    }
}
