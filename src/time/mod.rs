pub mod error;
pub mod timer;
pub mod timeunit;

pub use self::timer::Timer;
pub use self::timeunit::TimeUnit;
