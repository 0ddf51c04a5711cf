use std::fmt;
use std::iter::repeat;

/// An error that occurred while parsing a time unit name.
#[derive(Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    UnitNotSupported(String),
}

impl ::std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::UnitNotSupported(ref unit) => write!(f, "Unit '{}' not supported", unit),
        }
    }
}

// Framed so a rejected unit name from `TimeUnit::from_str` stands out in the log output.
impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::UnitNotSupported(_) => {
                let hr: String = repeat('~').take(79).collect();
                writeln!(f, "UnitNotSupported(")?;
                writeln!(f, "{}", hr)?;
                writeln!(f, "{}", self)?;
                writeln!(f, "{}", hr)?;
                write!(f, ")")?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_display_names_the_rejected_unit() {
        let error = Error::UnitNotSupported("fortnight".to_owned());
        assert_eq!(error.to_string(), "Unit 'fortnight' not supported");
        assert!(format!("{:?}", error).starts_with("UnitNotSupported("));
    }
}
