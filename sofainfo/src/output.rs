//! Terminal output formatting utilities.

use colored::Colorize;

/// Width attribute and variable names are padded to.
const PAD_WIDTH: usize = 30;

/// Print an error message to stderr.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{}: {}", "error".red().bold(), err);

    // Print cause chain
    for cause in err.chain().skip(1) {
        eprintln!("  {}: {}", "caused by".red(), cause);
    }
}

/// Print a warning message to stderr.
pub fn print_warning(msg: &str) {
    eprintln!("{}: {}", "warning".yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{}: {}", "success".green().bold(), msg);
}

/// Print a verbose message (only in verbose mode).
pub fn print_verbose(msg: &str, verbose: bool) {
    if verbose {
        println!("{}: {}", "info".blue(), msg);
    }
}

/// Print a separator line.
pub fn print_separator() {
    println!("{}", "_".repeat(100).dimmed());
    println!();
}

/// Pad a name so that `=` signs line up.
pub fn pad(name: &str) -> String {
    format!("{:<width$}", name, width = PAD_WIDTH)
}

/// Print `name = value` with the name padded.
pub fn print_field(name: &str, value: impl std::fmt::Display) {
    println!("{} = {}", pad(name), value);
}

/// Join values with single spaces, in the order given.
pub fn format_values(values: impl IntoIterator<Item = f64>) -> String {
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad() {
        assert_eq!(pad("Title").len(), PAD_WIDTH);
        assert!(pad("Title").starts_with("Title "));

        let long = "x".repeat(PAD_WIDTH + 5);
        assert_eq!(pad(&long), long);
    }

    #[test]
    fn test_format_values() {
        assert_eq!(format_values([0.0, 1.5, -2.0]), "0 1.5 -2");
        assert_eq!(format_values(Vec::new()), "");
    }
}
