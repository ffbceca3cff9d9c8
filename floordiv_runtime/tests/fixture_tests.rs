//! Manifest-driven floor division cases.
//!
//! Each case in `fixtures/floordiv_cases.toml` is run four ways: statically
//! typed and dynamic operands, in both the value and the truth shape. All
//! four must agree with the manifest.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use floordiv_runtime::prelude::*;
use num_bigint::BigInt;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Manifest {
    case: Vec<Case>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Case {
    name: String,
    #[serde(default)]
    level: LanguageLevel,
    left: Literal,
    right: Literal,
    value: Option<Literal>,
    error: Option<String>,
    truth: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Literal {
    Int(i64),
    Long(String),
    Float(f64),
}

/// Operand with its kind fixed at compile time
enum Typed {
    Int(i64),
    Long(BigInt),
    Float(f64),
}

impl Literal {
    fn typed(&self) -> Typed {
        match self {
            Literal::Int(v) => Typed::Int(*v),
            Literal::Long(digits) => Typed::Long(
                BigInt::from_str(digits).unwrap_or_else(|e| panic!("bad long {digits}: {e}")),
            ),
            Literal::Float(v) => Typed::Float(*v),
        }
    }

    fn value(&self) -> Value {
        match self.typed() {
            Typed::Int(v) => Value::SmallInt(v),
            Typed::Long(v) => Value::BigInt(v),
            Typed::Float(v) => Value::Float(v),
        }
    }
}

macro_rules! with_typed_right {
    ($engine:expr, $a:expr, $b:expr) => {
        match $b {
            Typed::Int(y) => $engine.floor_divide_value($a, y),
            Typed::Long(y) => $engine.floor_divide_value($a, y),
            Typed::Float(y) => $engine.floor_divide_value($a, y),
        }
    };
}

fn divide_typed(engine: &FloorDivEngine, a: &Typed, b: &Typed) -> ArithmeticResult<Value> {
    match a {
        Typed::Int(x) => with_typed_right!(engine, x, b),
        Typed::Long(x) => with_typed_right!(engine, x, b),
        Typed::Float(x) => with_typed_right!(engine, x, b),
    }
}

/// Equality that tells signed zeros apart and treats NaN as equal to itself
fn same_value(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Float(a), Value::Float(b)) if a.is_nan() => b.is_nan(),
        (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
        _ => actual == expected,
    }
}

fn describe(result: &ArithmeticResult<Value>) -> String {
    match result {
        Ok(v) => format!("{v} ({v:?})"),
        Err(e) => format!("{}: {}", e.kind_name(), e),
    }
}

fn load_manifest() -> Manifest {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("floordiv_cases.toml");
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    toml::from_str(&text).unwrap_or_else(|e| panic!("failed to parse {}: {}", path.display(), e))
}

fn check_case(case: &Case) -> Result<(), String> {
    let config = match case.level {
        LanguageLevel::Legacy => EngineConfig::legacy(),
        LanguageLevel::Modern => EngineConfig::modern(),
    };
    let engine = FloorDivEngine::new(config);

    let typed = divide_typed(&engine, &case.left.typed(), &case.right.typed());
    let dynamic = engine.floor_divide_value(&case.left.value(), &case.right.value());

    for (label, result) in [("typed", &typed), ("dynamic", &dynamic)] {
        match (&case.value, &case.error, result) {
            (Some(expected), None, Ok(actual)) if same_value(actual, &expected.value()) => {}
            (None, Some(expected), Err(e)) if &format!("{}: {}", e.kind_name(), e) == expected => {}
            _ => {
                return Err(format!(
                    "{} [{}]: got {}, expected value {:?} / error {:?}",
                    case.name,
                    label,
                    describe(result),
                    case.value,
                    case.error
                ))
            }
        }
    }

    let expected_truth = match (case.truth, &typed) {
        (Some(t), _) => Truth::from(t),
        (None, Ok(v)) => Truth::from(v.is_truthy().map_err(|e| e.to_string())?),
        (None, Err(e)) => Truth::Exception(e.clone()),
    };
    let truth = engine.floor_divide_truth(&case.left.value(), &case.right.value());
    if truth != expected_truth {
        return Err(format!(
            "{} [truth]: got {}, expected {}",
            case.name, truth, expected_truth
        ));
    }

    Ok(())
}

#[test]
fn test_fixture_cases() {
    let manifest = load_manifest();
    assert!(!manifest.case.is_empty(), "manifest has no cases");

    let failures: Vec<String> = manifest
        .case
        .iter()
        .filter_map(|case| check_case(case).err())
        .collect();

    assert!(
        failures.is_empty(),
        "{} of {} cases failed:\n{}",
        failures.len(),
        manifest.case.len(),
        failures.join("\n")
    );
}

#[test]
fn test_fixture_names_are_unique() {
    let manifest = load_manifest();
    let mut names: Vec<&str> = manifest.case.iter().map(|c| c.name.as_str()).collect();
    names.sort_unstable();
    let before = names.len();
    names.dedup();
    assert_eq!(before, names.len(), "duplicate case names in manifest");
}
