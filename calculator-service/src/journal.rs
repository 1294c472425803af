//! Where the pipeline reports what happened to each request.
//!
//! Handlers never log directly; they hand a [`JournalEvent`] to the
//! [`OperationJournal`] stored in the application state. Production wires in
//! [`TracingJournal`]; tests can use [`MemoryJournal`] and inspect the entries.

use crate::operation::{ComputationError, Operation};
use std::fmt;
use std::sync::Mutex;
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JournalEvent<'a> {
    InvalidInput {
        num1: Option<&'a str>,
        num2: Option<&'a str>,
    },
    OperationNotFound {
        operation: &'a str,
    },
    Computed {
        operation: Operation,
        num1: f64,
        num2: f64,
        result: f64,
    },
    ComputationFailed {
        operation: Operation,
        error: ComputationError,
    },
}

impl JournalEvent<'_> {
    pub fn level(&self) -> Level {
        match self {
            JournalEvent::Computed { .. } => Level::INFO,
            _ => Level::ERROR,
        }
    }
}

impl fmt::Display for JournalEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JournalEvent::InvalidInput { num1, num2 } => write!(
                f,
                "Invalid input: num1={}, num2={}",
                num1.unwrap_or("undefined"),
                num2.unwrap_or("undefined")
            ),
            JournalEvent::OperationNotFound { operation } => {
                write!(f, "Operation not found: {}", operation)
            }
            JournalEvent::Computed {
                operation,
                num1,
                num2,
                result,
            } => write!(
                f,
                "Operation {} successful on {} and {}. Result = {}",
                operation,
                NumberText(*num1),
                NumberText(*num2),
                NumberText(*result)
            ),
            JournalEvent::ComputationFailed { error, .. } => write!(f, "{}", error),
        }
    }
}

/// Writes a number the way a JavaScript client would print it: `-0` as `0`,
/// exponent form with an explicit sign outside `[1e-6, 1e21)`.
struct NumberText(f64);

impl fmt::Display for NumberText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_nan() {
            return f.write_str("NaN");
        }
        if value.is_infinite() {
            return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
        }
        if value == 0.0 {
            return f.write_str("0");
        }
        let magnitude = value.abs();
        if (1e-6..1e21).contains(&magnitude) {
            return write!(f, "{}", value);
        }
        let exponential = format!("{:e}", value);
        match exponential.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                write!(f, "{}e+{}", mantissa, exponent)
            }
            _ => f.write_str(&exponential),
        }
    }
}

pub trait OperationJournal: Send + Sync {
    fn record(&self, event: &JournalEvent<'_>);
}

/// Emits every event through `tracing`, tagged with the service name.
#[derive(Debug, Clone)]
pub struct TracingJournal {
    service: String,
}

impl TracingJournal {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

impl OperationJournal for TracingJournal {
    fn record(&self, event: &JournalEvent<'_>) {
        match event {
            JournalEvent::Computed {
                operation,
                num1,
                num2,
                result,
            } => tracing::info!(
                service = %self.service,
                %operation,
                num1,
                num2,
                result,
                "{}",
                event
            ),
            JournalEvent::ComputationFailed { operation, .. } => tracing::error!(
                service = %self.service,
                %operation,
                "{}",
                event
            ),
            JournalEvent::InvalidInput { .. } | JournalEvent::OperationNotFound { .. } => {
                tracing::error!(service = %self.service, "{}", event)
            }
        }
    }
}

/// An entry captured by [`MemoryJournal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub level: Level,
    pub message: String,
}

/// Keeps rendered events in memory instead of writing them anywhere.
#[derive(Debug, Default)]
pub struct MemoryJournal {
    entries: Mutex<Vec<JournalEntry>>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl OperationJournal for MemoryJournal {
    fn record(&self, event: &JournalEvent<'_>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(JournalEntry {
                level: event.level(),
                message: event.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_event_messages() {
        let computed = JournalEvent::Computed {
            operation: Operation::Add,
            num1: 2.0,
            num2: 3.5,
            result: 5.5,
        };
        assert_eq!(
            computed.to_string(),
            "Operation add successful on 2 and 3.5. Result = 5.5"
        );
        assert_eq!(computed.level(), Level::INFO);

        let invalid = JournalEvent::InvalidInput {
            num1: Some("abc"),
            num2: None,
        };
        assert_eq!(
            invalid.to_string(),
            "Invalid input: num1=abc, num2=undefined"
        );
        assert_eq!(invalid.level(), Level::ERROR);

        let failed = JournalEvent::ComputationFailed {
            operation: Operation::Divide,
            error: ComputationError::DivisionByZero,
        };
        assert_eq!(failed.to_string(), "Cannot divide by zero");
    }

    #[test]
    fn test_numbers_in_messages_use_client_notation() {
        let cases = [
            (1e21, "1e+21"),
            (1.5e300, "1.5e+300"),
            (-2e25, "-2e+25"),
            (1e-7, "1e-7"),
            (123456789012.5, "123456789012.5"),
            (0.000001, "0.000001"),
            (-0.0, "0"),
            (f64::INFINITY, "Infinity"),
            (f64::NEG_INFINITY, "-Infinity"),
        ];
        for (value, expected) in cases {
            assert_eq!(NumberText(value).to_string(), expected, "{value:?}");
        }

        let overflowed = JournalEvent::Computed {
            operation: Operation::Multiply,
            num1: 1e200,
            num2: 1e200,
            result: f64::INFINITY,
        };
        assert_eq!(
            overflowed.to_string(),
            "Operation multiply successful on 1e+200 and 1e+200. Result = Infinity"
        );
    }

    #[test]
    fn test_memory_journal_records_in_order() {
        let journal = MemoryJournal::new();
        journal.record(&JournalEvent::OperationNotFound {
            operation: "modulo",
        });
        journal.record(&JournalEvent::Computed {
            operation: Operation::Multiply,
            num1: 2.0,
            num2: 4.0,
            result: 8.0,
        });

        let entries = journal.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, Level::ERROR);
        assert_eq!(entries[0].message, "Operation not found: modulo");
        assert_eq!(entries[1].level, Level::INFO);
    }

    #[derive(Clone, Default)]
    struct Capture {
        events: Arc<Mutex<Vec<(Level, String)>>>,
    }

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Capture {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            let mut visitor = FieldVisitor(String::new());
            event.record(&mut visitor);
            self.events
                .lock()
                .unwrap()
                .push((*event.metadata().level(), visitor.0));
        }
    }

    struct FieldVisitor(String);
    impl tracing::field::Visit for FieldVisitor {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
            self.0.push_str(&format!("{}={:?};", field.name(), value));
        }
    }

    #[test]
    fn test_tracing_journal_emits_service_tagged_events() {
        let capture = Capture::default();
        let events = capture.events.clone();
        let subscriber = tracing_subscriber::registry().with(capture);

        tracing::subscriber::with_default(subscriber, || {
            let journal = TracingJournal::new("calculator-microservice");
            journal.record(&JournalEvent::ComputationFailed {
                operation: Operation::Divide,
                error: ComputationError::DivisionByZero,
            });
            journal.record(&JournalEvent::Computed {
                operation: Operation::Add,
                num1: 2.0,
                num2: 3.0,
                result: 5.0,
            });
        });

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, Level::ERROR);
        assert!(events[0].1.contains("service=calculator-microservice"));
        assert!(events[0].1.contains("Cannot divide by zero"));
        assert_eq!(events[1].0, Level::INFO);
        assert!(events[1].1.contains("Result = 5"));
    }
}
