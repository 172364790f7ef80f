//! Command-line argument definitions using clap derive macros.

use clap::Parser;
use std::path::PathBuf;

/// Print information about AES69 (SOFA) files.
///
/// sofainfo checks that a file is a valid SOFA file and a valid
/// FreeFieldDirectivityTF file, then prints its global attributes,
/// dimensions, receiver and emitter positions, frequency values and
/// complex transfer-function data.
#[derive(Parser, Debug)]
#[command(name = "sofainfo")]
#[command(author, version, about, long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Args {
    /// Input .sofa file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    // ========================================================================
    // Mode Selection
    // ========================================================================
    /// Only check validity and report why a file is rejected
    #[arg(long)]
    pub check: bool,

    // ========================================================================
    // Sections
    // ========================================================================
    /// Do not print ReceiverPosition
    #[arg(long)]
    pub no_receiver: bool,

    /// Do not print EmitterPosition
    #[arg(long)]
    pub no_emitter: bool,

    /// Do not print the frequency values (N)
    #[arg(long)]
    pub no_frequencies: bool,

    /// Do not print Data.Real and Data.Imag
    #[arg(long)]
    pub no_data: bool,

    // ========================================================================
    // Output Control
    // ========================================================================
    /// Show why a file is not valid and enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress warnings
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Validate argument combinations.
    pub fn validate(&self) -> Result<(), String> {
        if !self.input.exists() {
            return Err(format!("Input file not found: {}", self.input.display()));
        }

        if self.input.is_dir() {
            return Err(format!(
                "Input is a directory, not a SOFA file: {}",
                self.input.display()
            ));
        }

        Ok(())
    }
}

/// Example usage shown in --help.
const EXAMPLES: &str = r#"
EXAMPLES:
    # Print everything
    sofainfo speaker.sofa

    # Attributes, dimensions and positions only
    sofainfo --no-frequencies --no-data speaker.sofa

    # Check validity, explaining any rejection
    sofainfo --check -v speaker.sofa
"#;
