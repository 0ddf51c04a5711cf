pub mod cargo_env {
    pub const CARGO_PKG_NAME: &str = env!("CARGO_PKG_NAME");
}

pub mod common {
    pub const DEFAULT_REPORT_PATH: &str = "report.junit.xml";
    /// Prefix of environment variables overlaying the settings file.
    pub const ENV_PREFIX: &str = "SUITE_REPORT";
    pub const ENV_SEPARATOR: &str = "__";
    /// Shell convention for a run stopped by SIGINT (128 + 2).
    pub const INTERRUPTED_EXIT_CODE: i32 = 130;
}
