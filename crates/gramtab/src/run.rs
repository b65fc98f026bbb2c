//! Artifact orchestration: load, build, render, then write.

use crate::cli::Cli;
use crate::config::GramtabConfig;
use anyhow::Context;
use gramtab_core::input::load_grammar;
use gramtab_core::ir::GrammarFlavor;
use gramtab_core::output::{
    CapabilityStringTable, ExtensionEnum, ExtensionStringTables, write_artifact,
};
use gramtab_core::tables::{
    CapabilityStrings, ExtensionVocabulary, build_ext_inst_table, build_instruction_table,
    build_operand_kind_table,
};
use gramtab_core::{CapabilityIndex, Fragment, FragmentKind, TableOptions};
use std::path::{Path, PathBuf};

/// A fully rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub fragments: Vec<FragmentKind>,
    pub contents: String,
}

impl Artifact {
    fn single(path: &Path, fragment: &dyn Fragment, options: &TableOptions) -> Self {
        Self {
            path: path.to_path_buf(),
            fragments: vec![fragment.kind()],
            contents: fragment.render(options),
        }
    }
}

/// Table options from the config file, with command-line overrides applied.
pub fn resolve_options(cli: &Cli) -> anyhow::Result<TableOptions> {
    let mut options = match &cli.config {
        Some(path) => GramtabConfig::load(path)?.tables,
        None => TableOptions::default(),
    };
    if let Some(encoding) = cli.capability_encoding {
        options.capability_encoding = encoding.into();
    }
    Ok(options)
}

/// Build and render every requested artifact without touching the filesystem
/// beyond reading the grammars.
pub fn render_artifacts(cli: &Cli, options: &TableOptions) -> anyhow::Result<Vec<Artifact>> {
    let core = load_grammar(&cli.core_grammar, GrammarFlavor::Core)
        .context("failed to load core grammar")?;
    let caps = CapabilityIndex::from_grammar(&core).context("invalid core grammar")?;
    let mut artifacts = Vec::new();

    if let (Some(insts_path), Some(kinds_path)) = (&cli.core_insts_output, &cli.operand_kinds_output)
    {
        let insts = build_instruction_table(&core, &caps, options)
            .context("failed to build core instruction table")?;
        let kinds = build_operand_kind_table(&core, &caps, options)
            .context("failed to build operand kind table")?;
        artifacts.push(Artifact::single(insts_path, &insts, options));
        artifacts.push(Artifact::single(kinds_path, &kinds, options));
    }

    let ext_sets = [
        ("GLSL.std.450", &cli.extinst_glsl_grammar, &cli.glsl_insts_output),
        ("OpenCL.std", &cli.extinst_opencl_grammar, &cli.opencl_insts_output),
    ];
    for (set, grammar_path, output) in ext_sets {
        let (Some(grammar_path), Some(output)) = (grammar_path, output) else {
            continue;
        };
        let grammar = load_grammar(grammar_path, GrammarFlavor::ExtendedInstructionSet)
            .with_context(|| format!("failed to load {set} grammar"))?;
        let table = build_ext_inst_table(&grammar, &caps, options)
            .with_context(|| format!("failed to build {set} instruction table"))?;
        artifacts.push(Artifact::single(output, &table, options));
    }

    if cli.extension_enum_output.is_some() || cli.enum_string_mapping_output.is_some() {
        let vocab = ExtensionVocabulary::from_grammar(&core);
        if let Some(path) = &cli.extension_enum_output {
            artifacts.push(Artifact::single(path, &ExtensionEnum(&vocab), options));
        }
        if let Some(path) = &cli.enum_string_mapping_output {
            let strings = CapabilityStrings::from_index(&caps);
            let extensions = ExtensionStringTables(&vocab);
            let capabilities = CapabilityStringTable(&strings);
            artifacts.push(Artifact {
                path: path.clone(),
                fragments: vec![extensions.kind(), capabilities.kind()],
                contents: format!(
                    "{}\n{}",
                    extensions.render(options),
                    capabilities.render(options)
                ),
            });
        }
    }

    Ok(artifacts)
}

/// Run a validated command line.
///
/// Every artifact is rendered before the first one is written, so a grammar
/// or schema error leaves the output paths untouched.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let options = resolve_options(cli)?;
    let artifacts = render_artifacts(cli, &options)?;
    for artifact in &artifacts {
        write_artifact(&artifact.path, &artifact.contents)?;
        tracing::debug!(path = %artifact.path.display(), fragments = ?artifact.fragments, "emitted");
    }
    tracing::info!(artifacts = artifacts.len(), "done");
    Ok(())
}
