//! Shared fixtures: SOFA content assembled in memory.

#![allow(dead_code)]

use sofa_rs::MemoryStorage;

/// Global attributes of a well-formed FreeFieldDirectivityTF 1.0 file.
pub const ATTRIBUTES: &[(&str, &str)] = &[
    ("Conventions", "SOFA"),
    ("Version", "2.1"),
    ("SOFAConventions", "FreeFieldDirectivityTF"),
    ("SOFAConventionsVersion", "1.0"),
    ("APIName", "sofa-rs"),
    ("APIVersion", "0.1"),
    ("DataType", "TF"),
    ("RoomType", "free field"),
    ("Title", "Test loudspeaker"),
    ("DateCreated", "2022-07-10 12:00:00"),
    ("DateModified", "2022-07-10 12:00:00"),
    ("AuthorContact", "nobody@example.org"),
    ("Organization", "Example"),
    ("License", "CC BY 4.0"),
];

/// Value stored at `Data.Real[m][r][n]`: its own row-major offset.
pub fn real_at(m: usize, r: usize, n: usize, dims_r: usize, dims_n: usize) -> f64 {
    (dims_r * dims_n * m + dims_n * r + n) as f64
}

/// A valid FreeFieldDirectivityTF file with M=3, R=2, E=1, N=4.
///
/// `Data.Real` holds 0..24, `Data.Imag` holds the negated values.
pub fn directivity() -> MemoryStorage {
    let (m, r, e, n) = (3, 2, 1, 4);

    let mut storage = MemoryStorage::new();
    for (name, value) in ATTRIBUTES {
        storage = storage.with_attribute(*name, *value);
    }

    let real: Vec<f64> = (0..m * r * n).map(|x| x as f64).collect();
    let imag: Vec<f64> = real.iter().map(|x| -x).collect();

    storage
        .with_dimension("I", 1)
        .with_dimension("C", 3)
        .with_dimension("M", m)
        .with_dimension("R", r)
        .with_dimension("E", e)
        .with_dimension("N", n)
        .with_variable("ListenerPosition", &[("I", 1), ("C", 3)], vec![0.0, 0.0, 0.0])
        .with_variable_attribute("ListenerPosition", "Type", "cartesian")
        .with_variable_attribute("ListenerPosition", "Units", "metre")
        .with_variable("SourcePosition", &[("I", 1), ("C", 3)], vec![0.0, 0.0, 1.5])
        .with_variable_attribute("SourcePosition", "Type", "spherical")
        .with_variable_attribute("SourcePosition", "Units", "degree, degree, metre")
        .with_variable(
            "ReceiverPosition",
            &[("R", r), ("C", 3), ("I", 1)],
            vec![0.0, 0.0, 2.0, 90.0, 0.0, 2.0],
        )
        .with_variable_attribute("ReceiverPosition", "Type", "spherical")
        .with_variable_attribute("ReceiverPosition", "Units", "degree, degree, metre")
        .with_variable("EmitterPosition", &[("E", e), ("C", 3)], vec![0.0, 0.0, 0.0])
        .with_variable_attribute("EmitterPosition", "Type", "cartesian")
        .with_variable_attribute("EmitterPosition", "Units", "metre")
        .with_variable("N", &[("N", n)], vec![125.0, 250.0, 500.0, 1000.0])
        .with_variable_attribute("N", "Units", "hertz")
        .with_variable_attribute("N", "LongName", "frequency")
        .with_variable("Data.Real", &[("M", m), ("R", r), ("N", n)], real)
        .with_variable("Data.Imag", &[("M", m), ("R", r), ("N", n)], imag)
}
