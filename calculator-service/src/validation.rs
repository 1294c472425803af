use crate::dtos::OperandQuery;
use crate::error::CalcError;
use crate::journal::{JournalEvent, OperationJournal};

/// Two operands that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationRequest {
    pub num1: f64,
    pub num2: f64,
}

/// Parses one operand.
///
/// Surrounding whitespace is ignored. Anything that is not a plain decimal
/// literal with a finite value is refused, including `NaN`, `inf`,
/// `Infinity` and literals that overflow such as `1e400`.
pub fn parse_operand(raw: Option<&str>) -> Option<f64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Turns the raw query into operands, or rejects the request.
///
/// A rejection is journaled with the offending raw values before returning.
pub fn validate(
    query: &OperandQuery,
    journal: &dyn OperationJournal,
) -> Result<OperationRequest, CalcError> {
    let num1 = parse_operand(query.num1.as_deref());
    let num2 = parse_operand(query.num2.as_deref());

    match (num1, num2) {
        (Some(num1), Some(num2)) => Ok(OperationRequest { num1, num2 }),
        _ => {
            journal.record(&JournalEvent::InvalidInput {
                num1: query.num1.as_deref(),
                num2: query.num2.as_deref(),
            });
            Err(CalcError::InvalidInput {
                num1: query.num1.clone(),
                num2: query.num2.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::MemoryJournal;
    use tracing::Level;

    fn query(num1: Option<&str>, num2: Option<&str>) -> OperandQuery {
        OperandQuery {
            num1: num1.map(str::to_string),
            num2: num2.map(str::to_string),
        }
    }

    #[test]
    fn test_accepts_decimal_literals() {
        assert_eq!(parse_operand(Some("2")), Some(2.0));
        assert_eq!(parse_operand(Some("-3.25")), Some(-3.25));
        assert_eq!(parse_operand(Some("+7")), Some(7.0));
        assert_eq!(parse_operand(Some(".5")), Some(0.5));
        assert_eq!(parse_operand(Some("1e3")), Some(1000.0));
        assert_eq!(parse_operand(Some("  42 ")), Some(42.0));
    }

    #[test]
    fn test_rejects_non_numbers() {
        for raw in ["", "   ", "abc", "12abc", "1,2", "0x10", "1_000", "--1"] {
            assert_eq!(parse_operand(Some(raw)), None, "{raw:?} should be rejected");
        }
        assert_eq!(parse_operand(None), None);
    }

    #[test]
    fn test_rejects_non_finite_literals() {
        for raw in ["NaN", "nan", "inf", "-inf", "Infinity", "-Infinity", "1e400"] {
            assert_eq!(parse_operand(Some(raw)), None, "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_validate_success_does_not_journal() {
        let journal = MemoryJournal::new();
        let request = validate(&query(Some("10"), Some("0")), &journal).unwrap();
        assert_eq!(request, OperationRequest { num1: 10.0, num2: 0.0 });
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn test_validate_rejection_is_journaled_with_raw_inputs() {
        let journal = MemoryJournal::new();
        let err = validate(&query(Some("abc"), Some("4")), &journal).unwrap_err();

        assert_eq!(
            err,
            CalcError::InvalidInput {
                num1: Some("abc".into()),
                num2: Some("4".into()),
            }
        );
        let entries = journal.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::ERROR);
        assert_eq!(entries[0].message, "Invalid input: num1=abc, num2=4");
    }

    #[test]
    fn test_validate_missing_operand() {
        let journal = MemoryJournal::new();
        assert!(validate(&query(Some("1"), None), &journal).is_err());
        assert_eq!(
            journal.entries()[0].message,
            "Invalid input: num1=1, num2=undefined"
        );
    }
}
