//! Test data builders for creating test objects

use std::cell::{Cell, RefCell};
use std::time::{Duration, UNIX_EPOCH};

use envdash_rs::error::Result;
use envdash_rs::ingest::ModificationToken;
use envdash_rs::{Reading, TelemetrySource};

/// Builder for creating test Readings
pub struct ReadingBuilder {
    temperature: f64,
    light: f64,
    gas: f64,
    humidity: f64,
}

impl ReadingBuilder {
    pub fn new() -> Self {
        Self {
            temperature: 21.0,
            light: 1000.0,
            gas: 400.0,
            humidity: 45.0,
        }
    }

    pub fn temperature(mut self, value: f64) -> Self {
        self.temperature = value;
        self
    }

    pub fn humidity(mut self, value: f64) -> Self {
        self.humidity = value;
        self
    }

    pub fn build(self) -> Reading {
        Reading::new(self.temperature, self.light, self.gas, self.humidity)
    }

    pub fn payload(self) -> String {
        self.build().to_payload()
    }
}

/// In-memory source whose token advances on every write
///
/// Avoids depending on filesystem mtime resolution in timing-sensitive tests.
pub struct ScriptedSource {
    payload: RefCell<Option<String>>,
    generation: Cell<u64>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            payload: RefCell::new(None),
            generation: Cell::new(0),
        }
    }

    pub fn write(&self, payload: impl Into<String>) {
        *self.payload.borrow_mut() = Some(payload.into());
        self.generation.set(self.generation.get() + 1);
    }
}

impl TelemetrySource for ScriptedSource {
    fn modification_token(&self) -> Result<Option<ModificationToken>> {
        let len = match self.payload.borrow().as_ref() {
            Some(payload) => payload.len() as u64,
            None => return Ok(None),
        };
        Ok(Some(ModificationToken::new(
            UNIX_EPOCH + Duration::from_secs(self.generation.get()),
            len,
        )))
    }

    fn read_payload(&self) -> Result<String> {
        Ok(self.payload.borrow().clone().unwrap_or_default())
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}
