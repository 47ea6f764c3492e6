use bigm_utils::{dejsonify, jsonify};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Settings {
    zeta: f64,
    alpha: Vec<u32>,
    nested: Nested,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Nested {
    b: bool,
    a: String,
}

#[test]
fn test_jsonify_sorts_keys() {
    let settings = Settings {
        zeta: 0.5,
        alpha: vec![3, 1],
        nested: Nested {
            b: true,
            a: "x".to_string(),
        },
    };
    assert_eq!(
        jsonify(&settings).unwrap(),
        r#"{"alpha":[3,1],"nested":{"a":"x","b":true},"zeta":0.5}"#
    );
}

#[test]
fn test_dejsonify() {
    let settings: Settings =
        dejsonify(r#"{"nested":{"a":"y","b":false},"zeta":1.0,"alpha":[]}"#).unwrap();
    assert_eq!(
        settings,
        Settings {
            zeta: 1.0,
            alpha: vec![],
            nested: Nested {
                b: false,
                a: "y".to_string(),
            },
        }
    );
    assert!(dejsonify::<Settings>(r#"{"zeta":1.0}"#).is_err());
}
