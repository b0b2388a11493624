use log::LevelFilter;

/// Routes the crate's log output to the test harness, ignoring repeated calls.
pub fn init_logger() {
    env_logger::builder()
        .is_test(true)
        .filter_module(env!("CARGO_CRATE_NAME"), LevelFilter::Trace)
        .parse_default_env()
        .try_init()
        .ok();
}
