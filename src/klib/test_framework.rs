//! Framework de testes do kernel
//!
//! Suítes são arrays `const` de `TestCase`; `run_test_suite` executa todas
//! e loga `[PASS]`/`[FAIL]`/`[SKIP]` por caso.

/// Resultado de teste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    Pass,
    Fail,
    Skip,
}

impl TestResult {
    /// Converte um booleano de verificação em resultado
    #[inline]
    pub const fn from_bool(ok: bool) -> Self {
        if ok {
            Self::Pass
        } else {
            Self::Fail
        }
    }
}

/// Um caso de teste
pub struct TestCase {
    pub name: &'static str,
    pub func: fn() -> TestResult,
}

impl TestCase {
    pub const fn new(name: &'static str, func: fn() -> TestResult) -> Self {
        Self { name, func }
    }
}

/// Contagem de resultados de uma suíte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteSummary {
    pub suite: &'static str,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl SuiteSummary {
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Executa suite de testes
pub fn run_test_suite(name: &'static str, tests: &[TestCase]) -> SuiteSummary {
    let mut summary = SuiteSummary {
        suite: name,
        ..SuiteSummary::default()
    };

    crate::kinfo!("=== Executando suite:");
    crate::kinfo!(summary.suite);

    for test in tests {
        match (test.func)() {
            TestResult::Pass => {
                crate::kinfo!("[PASS]");
                crate::kinfo!(test.name);
                summary.passed += 1;
            }
            TestResult::Fail => {
                crate::kerror!("[FAIL]");
                crate::kerror!(test.name);
                summary.failed += 1;
            }
            TestResult::Skip => {
                crate::kwarn!("[SKIP]");
                crate::kwarn!(test.name);
                summary.skipped += 1;
            }
        }
    }

    crate::kinfo!("Resultados: passed=", summary.passed);
    if summary.failed != 0 {
        crate::kerror!("Resultados: failed=", summary.failed);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always_pass() -> TestResult {
        TestResult::Pass
    }

    fn always_fail() -> TestResult {
        TestResult::Fail
    }

    fn skipped() -> TestResult {
        TestResult::Skip
    }

    #[test]
    fn suite_counts_each_outcome() {
        const SUITE: &[TestCase] = &[
            TestCase::new("pass", always_pass),
            TestCase::new("fail", always_fail),
            TestCase::new("skip", skipped),
            TestCase::new("pass_again", always_pass),
        ];

        let summary = run_test_suite("mixed", SUITE);
        assert_eq!(summary.suite, "mixed");
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert!(!summary.all_passed());
    }

    #[test]
    fn empty_suite_keeps_its_name_and_passes() {
        let summary = run_test_suite("vazia", &[]);
        assert_eq!(summary.suite, "vazia");
        assert_eq!(summary.passed + summary.failed + summary.skipped, 0);
        assert!(summary.all_passed());
    }

    #[test]
    fn from_bool_maps_to_pass_or_fail() {
        assert_eq!(TestResult::from_bool(true), TestResult::Pass);
        assert_eq!(TestResult::from_bool(false), TestResult::Fail);
    }
}
