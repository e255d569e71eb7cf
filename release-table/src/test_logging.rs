use std::sync::Once;

// test-log is built without its `log` feature, so tests that want to see log output from the
// client code call this instead.
pub(crate) fn init_logging() {
    static INIT_LOGGING: Once = Once::new();
    INIT_LOGGING.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
