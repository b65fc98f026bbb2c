//! Command-line arguments and usage checks.

use clap::{Parser, ValueEnum};
use gramtab_core::CapabilityEncoding;
use std::path::PathBuf;

/// Generate descriptor tables from instruction-set grammars.
#[derive(Parser, Debug, Clone)]
#[command(name = "gramtab", version, about)]
pub struct Cli {
    /// Core instruction grammar (JSON)
    #[arg(long, value_name = "PATH")]
    pub core_grammar: PathBuf,

    /// Output for the core instruction table
    #[arg(long, value_name = "PATH")]
    pub core_insts_output: Option<PathBuf>,

    /// Output for the operand kind table
    #[arg(long, value_name = "PATH")]
    pub operand_kinds_output: Option<PathBuf>,

    /// GLSL.std.450 extended instruction grammar (JSON)
    #[arg(long, value_name = "PATH")]
    pub extinst_glsl_grammar: Option<PathBuf>,

    /// Output for the GLSL.std.450 instruction table
    #[arg(long, value_name = "PATH")]
    pub glsl_insts_output: Option<PathBuf>,

    /// OpenCL.std extended instruction grammar (JSON)
    #[arg(long, value_name = "PATH")]
    pub extinst_opencl_grammar: Option<PathBuf>,

    /// Output for the OpenCL.std instruction table
    #[arg(long, value_name = "PATH")]
    pub opencl_insts_output: Option<PathBuf>,

    /// Output for the extension enumeration body
    #[arg(long, value_name = "PATH")]
    pub extension_enum_output: Option<PathBuf>,

    /// Output for the extension and capability string tables
    #[arg(long, value_name = "PATH")]
    pub enum_string_mapping_output: Option<PathBuf>,

    /// Capability requirement encoding (overrides the config file)
    #[arg(long, value_enum)]
    pub capability_encoding: Option<EncodingArg>,

    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EncodingArg {
    /// Symbolic capability lists
    List,
    /// 64-bit capability masks
    Mask,
}

impl From<EncodingArg> for CapabilityEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::List => CapabilityEncoding::List,
            EncodingArg::Mask => CapabilityEncoding::Mask,
        }
    }
}

/// Arguments that parse but cannot describe a run.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("--{given} requires --{missing}")]
    Unpaired {
        given: &'static str,
        missing: &'static str,
    },

    #[error("no output requested")]
    NoOutputs,
}

impl Cli {
    /// Check flag pairings before anything is read or written.
    pub fn validate(&self) -> Result<(), UsageError> {
        let pairs = [
            (
                ("core-insts-output", self.core_insts_output.is_some()),
                ("operand-kinds-output", self.operand_kinds_output.is_some()),
            ),
            (
                ("extinst-glsl-grammar", self.extinst_glsl_grammar.is_some()),
                ("glsl-insts-output", self.glsl_insts_output.is_some()),
            ),
            (
                ("extinst-opencl-grammar", self.extinst_opencl_grammar.is_some()),
                ("opencl-insts-output", self.opencl_insts_output.is_some()),
            ),
        ];
        for ((a, has_a), (b, has_b)) in pairs {
            match (has_a, has_b) {
                (true, false) => return Err(UsageError::Unpaired { given: a, missing: b }),
                (false, true) => return Err(UsageError::Unpaired { given: b, missing: a }),
                _ => {}
            }
        }

        let outputs = [
            &self.core_insts_output,
            &self.glsl_insts_output,
            &self.opencl_insts_output,
            &self.extension_enum_output,
            &self.enum_string_mapping_output,
        ];
        if outputs.iter().all(|o| o.is_none()) {
            return Err(UsageError::NoOutputs);
        }
        Ok(())
    }
}
