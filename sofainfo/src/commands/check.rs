//! Validity check command (--check mode).

use anyhow::{bail, Context, Result};
use colored::Colorize;

use sofa_rs::{FreeFieldDirectivityTF, OpenMode, SofaFile};

use crate::cli::Args;
use crate::output;

/// Run the check command.
///
/// Fails (exit code 1) unless the file is a valid FreeFieldDirectivityTF
/// file.
pub fn run(args: &Args) -> Result<()> {
    output::print_verbose(
        &format!("Opening SOFA file: {}", args.input.display()),
        args.verbose,
    );

    let file = SofaFile::open(&args.input, OpenMode::Read)
        .with_context(|| format!("Failed to open SOFA file: {}", args.input.display()))?;

    file.validate()
        .with_context(|| format!("{} is not a valid SOFA file", args.input.display()))?;
    println!("  {} SOFA structure", "✓".green());

    let tf = FreeFieldDirectivityTF::from_file(file);
    if let Err(e) = tf.validate() {
        bail!(
            "{} is not a valid '{}' file: {}",
            args.input.display(),
            FreeFieldDirectivityTF::NAME,
            e
        );
    }
    println!(
        "  {} {} {}",
        "✓".green(),
        FreeFieldDirectivityTF::NAME,
        FreeFieldDirectivityTF::VERSION
    );

    let dims = tf.governing_dimensions()?;
    output::print_verbose(
        &format!("R={} E={} M={} N={}", dims.r, dims.e, dims.m, dims.n),
        args.verbose,
    );

    println!();
    output::print_success(&format!("{} is valid", args.input.display()));
    Ok(())
}
