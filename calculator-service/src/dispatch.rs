use crate::error::{CalcError, OperationOutcome};
use crate::journal::{JournalEvent, OperationJournal};
use crate::operation::Operation;
use crate::validation::OperationRequest;

/// Resolves `operation` and applies it to validated operands.
///
/// Every outcome, success or not, is journaled exactly once.
pub fn dispatch(
    operation: &str,
    request: OperationRequest,
    journal: &dyn OperationJournal,
) -> OperationOutcome {
    let op = match operation.parse::<Operation>() {
        Ok(op) => op,
        Err(unknown) => {
            journal.record(&JournalEvent::OperationNotFound { operation });
            return Err(CalcError::UnknownOperation(unknown.0));
        }
    };

    let OperationRequest { num1, num2 } = request;
    match op.apply(num1, num2) {
        Ok(result) => {
            journal.record(&JournalEvent::Computed {
                operation: op,
                num1,
                num2,
                result,
            });
            Ok(result)
        }
        Err(error) => {
            journal.record(&JournalEvent::ComputationFailed {
                operation: op,
                error,
            });
            Err(error.into())
        }
    }
}
