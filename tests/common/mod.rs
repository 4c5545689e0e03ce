/*!
 * Common test utilities shared across the test suite
 */


/// Initialize logging for tests that want to inspect dispatch decisions
///
/// Safe to call from several tests; only the first call installs the logger.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
