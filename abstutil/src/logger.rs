/// Intercept messages using the `log` crate and print them to STDERR. The default level is
/// `info`; override with `RUST_LOG`.
pub fn setup() {
    use env_logger::{Builder, Env};
    Builder::from_env(Env::default().default_filter_or("info")).init();
}

/// Like `setup`, but safe to call more than once. Tests use this.
pub fn setup_for_tests() {
    use env_logger::{Builder, Env};
    let _ = Builder::from_env(Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}
