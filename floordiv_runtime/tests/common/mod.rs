//! Shared helpers for integration tests
// Each test target uses a different subset of these helpers.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use floordiv_runtime::prelude::*;

/// Log of slot invocations, in call order.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: &str) {
        self.0.lock().unwrap().push(entry.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// A new-style type whose slot records `name` and returns `outcome`.
pub fn recording_type(
    name: &str,
    base: Option<&TypeRef>,
    log: &CallLog,
    outcome: SlotOutcome,
) -> TypeRef {
    let log = log.clone();
    let label = name.to_string();
    let mut builder = TypeDescriptor::builder(name);
    if let Some(base) = base {
        builder = builder.base(base);
    }
    builder
        .floor_divide_fn(move |_, _| {
            log.record(&label);
            Ok(outcome.clone())
        })
        .build()
}

/// A legacy type that coerces machine integers to itself. Its slot returns
/// `marker`.
pub fn legacy_number(name: &str, log: &CallLog, marker: i64) -> TypeRef {
    let coerce_log = log.clone();
    let slot_log = log.clone();
    let coerce_label = format!("{name}.coerce");
    let slot_label = format!("{name}.floordiv");
    TypeDescriptor::builder(name)
        .legacy()
        .coerce_fn(move |own, other| {
            coerce_log.record(&coerce_label);
            match other.as_small_int() {
                Some(_) => Ok(CoerceOutcome::Coerced(own.clone(), own.clone())),
                None => Ok(CoerceOutcome::NotApplicable),
            }
        })
        .floor_divide_fn(move |_, _| {
            slot_log.record(&slot_label);
            Ok(SlotOutcome::Produced(Value::SmallInt(marker)))
        })
        .build()
}

/// Engine over the legacy built-in registry
pub fn legacy_engine() -> FloorDivEngine {
    FloorDivEngine::new(EngineConfig::legacy())
}

/// Engine over the modern built-in registry
pub fn modern_engine() -> FloorDivEngine {
    FloorDivEngine::new(EngineConfig::modern())
}
