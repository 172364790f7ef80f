//! Generic file model tests against in-memory SOFA content.

mod common;

use sofa_rs::{CoordinateSystem, Error, MemoryStorage, Shape, SofaFile, Unit, REQUIRED_ATTRIBUTES};

#[test]
fn test_complete_file_is_valid() {
    let file = SofaFile::from_storage(common::directivity());
    assert!(file.is_valid());
    file.validate().unwrap();
}

#[test]
fn test_each_required_attribute_is_checked() {
    for name in REQUIRED_ATTRIBUTES {
        let file = SofaFile::from_storage(common::directivity().without_attribute(name));
        assert!(!file.is_valid(), "file without '{name}' should be invalid");
    }
}

#[test]
fn test_conventions_must_be_sofa() {
    let file = SofaFile::from_storage(common::directivity().with_attribute("Conventions", "CF-1.6"));
    assert!(!file.is_valid());
    assert!(matches!(file.validate(), Err(Error::ConventionMismatch { .. })));
}

#[test]
fn test_missing_dimension_is_invalid() {
    let storage = MemoryStorage::new();
    let storage = common::ATTRIBUTES
        .iter()
        .fold(storage, |s, (name, value)| s.with_attribute(*name, *value));
    let file = SofaFile::from_storage(storage.with_dimension("I", 1).with_dimension("C", 3));

    assert!(!file.is_valid());
    let err = file.validate().unwrap_err();
    assert!(err.to_string().contains("missing dimension 'M'"));
}

#[test]
fn test_wrong_coordinate_dimension_is_invalid() {
    let file = SofaFile::from_storage(common::directivity().with_dimension("C", 2));
    assert!(!file.is_valid());
}

#[test]
fn test_missing_positional_variable_is_invalid() {
    let file = SofaFile::from_storage(common::directivity().without_variable("SourcePosition"));
    assert!(!file.is_valid());
    assert!(file.validate().unwrap_err().is_not_found());
}

#[test]
fn test_attribute_dump_keeps_order() {
    let file = SofaFile::from_storage(common::directivity());
    let attrs = file.attributes();

    assert_eq!(attrs.len(), common::ATTRIBUTES.len());
    assert_eq!(attrs[0], ("Conventions".to_string(), "SOFA".to_string()));
    assert_eq!(file.data_type().unwrap(), "TF");
    assert_eq!(file.room_type().unwrap(), "free field");
}

#[test]
fn test_dimension_dump() {
    let file = SofaFile::from_storage(common::directivity());
    let names: Vec<_> = file.dimensions().into_iter().map(|d| d.name).collect();

    assert_eq!(names, vec!["I", "C", "M", "R", "E", "N"]);
    assert_eq!(file.dimension("R").unwrap(), 2);
    assert!(file.dimension("X").unwrap_err().is_not_found());
}

#[test]
fn test_positional_ranks_are_discovered() {
    let file = SofaFile::from_storage(common::directivity());

    let emitter = file.positional_data("EmitterPosition").unwrap();
    assert_eq!(emitter.shape, Shape::Simple(1, 3));

    let receiver = file.positional_data("ReceiverPosition").unwrap();
    assert_eq!(receiver.shape, Shape::PerSubEntity(2, 3, 1));
    assert_eq!(receiver.variable.coordinates, CoordinateSystem::Spherical);
    assert_eq!(receiver.variable.units, Unit::SphericalUnits);
    assert_eq!(receiver.get(&[1, 0, 0]), 90.0);
}

#[test]
fn test_emitter_position_scenario() {
    let storage = MemoryStorage::new()
        .with_variable(
            "EmitterPosition",
            &[("E", 2), ("C", 3)],
            vec![0.1, 0.2, 0.3, 1.1, 1.2, 1.3],
        )
        .with_variable_attribute("EmitterPosition", "Type", "cartesian")
        .with_variable_attribute("EmitterPosition", "Units", "metre");
    let file = SofaFile::from_storage(storage);

    assert_eq!(file.variable_shape("EmitterPosition").unwrap(), vec![2, 3]);

    let shape = file.positional_shape("EmitterPosition").unwrap();
    let mut out = vec![0.0; shape.len()];
    file.positional_data_into("EmitterPosition", &shape, &mut out).unwrap();

    assert_eq!(out.len(), 6);
    assert_eq!(shape.offset(&[1, 2]), 5);
    assert_eq!(out[5], 1.3);
}

#[test]
fn test_buffers_outlive_file() {
    let values = {
        let file = SofaFile::from_storage(common::directivity());
        file.variable_data("N").unwrap()
    };
    assert_eq!(values.values(), &[125.0, 250.0, 500.0, 1000.0]);
}
