//! Pure helpers summarising a list of execution results.

use crate::domain::models::ExecutionResult;

pub fn has_errors(results: &[ExecutionResult]) -> bool {
    results.iter().any(|r| !r.success)
}

pub fn error_count(results: &[ExecutionResult]) -> usize {
    results.iter().filter(|r| !r.success).count()
}

pub fn success_count(results: &[ExecutionResult]) -> usize {
    results.iter().filter(|r| r.success).count()
}

/// One-line summary printed in quiet mode.
///
/// `verb` describes what happened to each module, e.g. "bumped".
pub fn quiet_summary(results: &[ExecutionResult], verb: &str) -> String {
    let failed = error_count(results);
    let succeeded = success_count(results);
    if failed == 0 {
        format!("Success: {succeeded} module(s) {verb}")
    } else {
        format!("Completed: {succeeded} succeeded, {failed} failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Module;
    use std::time::Duration;

    fn results(outcomes: &[bool]) -> Vec<ExecutionResult> {
        outcomes
            .iter()
            .enumerate()
            .map(|(i, ok)| {
                let module = Module::new(format!("m{i}"), "/r/.version", ".version", "");
                let duration = Duration::from_millis(10);
                if *ok {
                    ExecutionResult::succeeded(module, None, duration)
                } else {
                    ExecutionResult::failed(module, "boom", duration)
                }
            })
            .collect()
    }

    #[test]
    fn test_counts() {
        let mixed = results(&[true, false, true]);
        assert!(has_errors(&mixed));
        assert_eq!(error_count(&mixed), 1);
        assert_eq!(success_count(&mixed), 2);

        assert!(!has_errors(&results(&[true, true])));
        assert!(!has_errors(&[]));
    }

    #[test]
    fn test_quiet_summary() {
        assert_eq!(
            quiet_summary(&results(&[true, true]), "bumped"),
            "Success: 2 module(s) bumped"
        );
        assert_eq!(
            quiet_summary(&results(&[true, false, false]), "bumped"),
            "Completed: 1 succeeded, 2 failed"
        );
    }
}
