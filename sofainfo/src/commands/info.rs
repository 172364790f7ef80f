//! Default command: print the contents of a SOFA file.

use anyhow::{Context, Result};
use colored::Colorize;

use sofa_rs::{
    FlatBuffer, FreeFieldDirectivityTF, GoverningDimensions, OpenMode, PositionalData, Shape,
    SofaFile, DATA_IMAG, DATA_REAL, FREQUENCY_VARIABLE,
};

use crate::cli::Args;
use crate::output;

/// Run the info command.
///
/// A file that is not valid SOFA, or not valid FreeFieldDirectivityTF, is
/// reported and ends the listing without an error.
pub fn run(args: &Args) -> Result<()> {
    output::print_verbose(
        &format!("Opening SOFA file: {}", args.input.display()),
        args.verbose,
    );

    let file = SofaFile::open(&args.input, OpenMode::Read)
        .with_context(|| format!("Failed to open SOFA file: {}", args.input.display()))?;

    let name = args.input.display();
    match file.validate() {
        Ok(()) => println!("{} is a valid SOFA file", name),
        Err(e) => {
            println!("{} is not a valid SOFA file", name);
            output::print_verbose(&e.to_string(), args.verbose);
            return Ok(());
        }
    }

    output::print_separator();
    println!("{}", "Global Attributes:".bold());
    println!();
    for (attr, value) in file.attributes() {
        output::print_field(&attr, value);
    }

    output::print_separator();
    println!("{}", "Dimensions:".bold());
    println!();
    for dim in file.dimensions() {
        output::print_field(&dim.name, dim.len);
    }
    output::print_separator();

    let tf = FreeFieldDirectivityTF::from_file(file);
    if let Err(e) = tf.validate() {
        println!(
            "{} is not a valid '{}' file",
            name,
            FreeFieldDirectivityTF::NAME
        );
        output::print_verbose(&e.to_string(), args.verbose);
        return Ok(());
    }
    println!(
        "{} is a valid '{}' file",
        name,
        FreeFieldDirectivityTF::NAME
    );
    output::print_separator();

    let dims = tf.governing_dimensions()?;
    log::debug!("printing {:?}", dims);

    if !args.no_receiver {
        let receivers = tf.file().positional_data("ReceiverPosition")?;
        print_positions(&receivers);
    }

    if !args.no_emitter {
        let emitters = tf.file().positional_data("EmitterPosition")?;
        print_positions(&emitters);
    }

    if !args.no_frequencies {
        print_frequencies(&tf, args.quiet)?;
    }

    if !args.no_data {
        print_data(DATA_REAL, &tf.data_real()?, &dims);
        print_data(DATA_IMAG, &tf.data_imag()?, &dims);
    }

    Ok(())
}

/// Print `:Type`, `:Units` and one row of values per entity.
///
/// Values within a row keep row-major order (sub-entity axis before the
/// trailing axis), so concatenating the rows gives the file order.
fn print_positions(data: &PositionalData) {
    output::print_field(&format!("{}:Type", data.name), data.variable.coordinates);
    output::print_field(&format!("{}:Units", data.name), data.variable.units);
    println!();

    let per_entity = data.shape.len() / data.shape.entities().max(1);
    print_rows(data.iter().map(|(_, v)| v), per_entity);

    output::print_separator();
}

/// Print `values` in lines of `row_len`.
fn print_rows(values: impl Iterator<Item = f64>, row_len: usize) {
    let values: Vec<f64> = values.collect();
    for row in values.chunks(row_len.max(1)) {
        println!("{}", output::format_values(row.iter().copied()));
    }
}

fn print_frequencies(tf: &FreeFieldDirectivityTF, quiet: bool) -> Result<()> {
    let values = tf.frequency_values()?;
    let units = match tf.frequency_units() {
        Ok(unit) => unit.to_string(),
        Err(e) => {
            if !quiet {
                output::print_warning(&format!("{}: {}", FREQUENCY_VARIABLE, e));
            }
            String::from("unknown")
        }
    };

    println!(
        "Frequency Values (\"{}\") in {}:",
        FREQUENCY_VARIABLE, units
    );
    if let Some(long_name) = tf.frequency_long_name() {
        output::print_field(&format!("{}:LongName", FREQUENCY_VARIABLE), long_name);
    }
    println!();
    println!("{}", output::format_values(values));
    output::print_separator();
    Ok(())
}

/// Print one `[M x R x N]` block: a row of N bins per (measurement,
/// receiver), a blank line after each measurement.
fn print_data(name: &str, buffer: &FlatBuffer, dims: &GoverningDimensions) {
    let [m, r, n] = dims.data_shape();
    println!("{}: [{}x{}x{}]", name, m, r, n);
    println!();

    let shape = Shape::PerSubEntity(m, r, n);
    let values: Vec<f64> = shape.indices().map(|c| buffer.get(&c)).collect();
    for measurement in values.chunks((r * n).max(1)) {
        print_rows(measurement.iter().copied(), n);
        println!();
    }

    output::print_separator();
}
