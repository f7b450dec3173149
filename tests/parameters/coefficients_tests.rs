//! Tests for coefficient collections and structural properties

use curvefit_rs::create_model;
use curvefit_rs::parameters::{Coefficients, ParameterError, Properties, PropertySpec};
use curvefit_rs::FitError;

const SPECS: &[PropertySpec] = &[
    PropertySpec::new("degree", 2, 0, 99, "highest power"),
    PropertySpec::new("order", 0, -3, 3, "signed setting"),
];

#[test]
fn test_coefficient_access() {
    let mut coefs = Coefficients::with_names(["a", "b"], 1.0).unwrap();
    assert_eq!(coefs.len(), 2);
    assert_eq!(coefs.index_of("b"), Some(1));
    assert_eq!(coefs.get("c"), None);

    coefs.set("b", -4.0).unwrap();
    let pairs: Vec<(&str, f64)> = coefs.iter().collect();
    assert_eq!(pairs, vec![("a", 1.0), ("b", -4.0)]);

    assert_eq!(
        coefs.set("c", 0.0),
        Err(ParameterError::UnknownCoefficient {
            name: "c".to_string()
        })
    );
}

#[test]
fn test_coefficient_json_format() {
    let coefs = Coefficients::indexed("a", 2, 0.5);
    let json = serde_json::to_value(&coefs).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"name": "a0", "value": 0.5},
            {"name": "a1", "value": 0.5}
        ])
    );
}

#[test]
fn test_properties_keep_declared_order() {
    let mut props = Properties::from_specs("Test", SPECS);
    props.set("order", -3).unwrap();

    let values: Vec<(&str, i64)> = props.iter().collect();
    assert_eq!(values, vec![("degree", 2), ("order", -3)]);
    assert!(SPECS[1].contains(3));
    assert!(!SPECS[1].contains(4));
}

#[test]
fn test_model_property_errors() {
    let mut model = create_model("Polynomial").unwrap();

    let err = model.set_property("exponent", 2).unwrap_err();
    assert!(err.is_name_error());

    match model.set_property("degree", 120).unwrap_err() {
        FitError::InvalidPropertyValue { name, value, min, max } => {
            assert_eq!(name, "degree");
            assert_eq!(value, 120);
            assert_eq!((min, max), (0, 99));
        }
        other => panic!("Expected InvalidPropertyValue, got {:?}", other),
    }

    // A rejected value leaves the model unchanged
    assert_eq!(model.get_property("degree").unwrap(), 2);
    assert_eq!(model.coefficient_count(), 3);
}

#[test]
fn test_model_coefficient_errors() {
    let mut model = create_model("Sin").unwrap();
    assert!(model.get_coefficient("a1").unwrap_err().is_name_error());
    assert!(model.set_coefficient("b", 1.0).unwrap_err().is_name_error());
    assert!(model.set_coefficient("a0", 3.0).is_ok());
}
