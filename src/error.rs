use crate::lang::Signal;

use core::fmt;

#[macro_export]
macro_rules! internal_err {
    () => {
        $crate::error::Error::Internal(None, std::file!(), std::line!()).into()
    };
    ( $x:expr ) => {
        $crate::error::Error::Internal(Some($x.to_string()), std::file!(), std::line!()).into()
    };
}

#[macro_export]
macro_rules! err {
    ( $x:expr ) => {
        $crate::error::Error::Other($x.to_string()).into()
    };
}

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    // operand normalization
    InvalidSubscriptType(&'static str),
    SubscriptOutOfBounds,
    SelectLessThanOne,
    SelectMoreThanOne,
    OnlyZeroMixedWithNegative,
    MissingSubscript,
    LogicalSubscriptTooLong,
    NoArrayDimnames,

    // shape validation
    IncorrectSubscripts,
    IncorrectSubscriptsMatrix,
    IncorrectDimensions,
    ImproperSubscript,

    // container kinds
    WrongArgsSubsetEnvironment,
    ObjectNotSubsettable(&'static str),

    // recursive list access
    RecursiveIndexingFailed(usize),
    NoSuchIndex(usize),

    // assignment
    ReplacementLengthZero,
    NAsInSubscriptedAssignment,
    MoreElementsSupplied,
    IncompatibleTypes(&'static str, &'static str),

    Other(String),

    // in-dev errors
    Internal(Option<String>, &'static str, u32),
}

impl Error {
    fn as_str(&self) -> String {
        match self {
            Error::InvalidSubscriptType(t) => format!("invalid subscript type '{t}'"),
            Error::SubscriptOutOfBounds => "subscript out of bounds".to_string(),
            Error::SelectLessThanOne => {
                "attempt to select less than one element".to_string()
            }
            Error::SelectMoreThanOne => {
                "attempt to select more than one element".to_string()
            }
            Error::OnlyZeroMixedWithNegative => {
                "only 0's may be mixed with negative subscripts".to_string()
            }
            Error::MissingSubscript => "[[ ]] with missing subscript".to_string(),
            Error::LogicalSubscriptTooLong => "(subscript) logical subscript too long".to_string(),
            Error::NoArrayDimnames => "no 'dimnames' attribute for array".to_string(),
            Error::IncorrectSubscripts => "incorrect number of subscripts".to_string(),
            Error::IncorrectSubscriptsMatrix => {
                "incorrect number of subscripts on matrix".to_string()
            }
            Error::IncorrectDimensions => "incorrect number of dimensions".to_string(),
            Error::ImproperSubscript => "[[ ]] improper number of subscripts".to_string(),
            Error::WrongArgsSubsetEnvironment => {
                "wrong arguments for subsetting an environment".to_string()
            }
            Error::ObjectNotSubsettable(t) => format!("object of type '{t}' is not subsettable"),
            Error::RecursiveIndexingFailed(level) => {
                format!("recursive indexing failed at level {level}")
            }
            Error::NoSuchIndex(level) => format!("no such index at level {level}"),
            Error::ReplacementLengthZero => "replacement has length zero".to_string(),
            Error::NAsInSubscriptedAssignment => {
                "NAs are not allowed in subscripted assignments".to_string()
            }
            Error::MoreElementsSupplied => {
                "more elements supplied than there are to replace".to_string()
            }
            Error::IncompatibleTypes(from, to) => {
                format!("incompatible types (from {from} to {to}) in subassignment type fix")
            }
            Error::Other(s) => s.to_string(),
            Error::Internal(None, file, line) => format!("Internal Error ({file}:{line})"),
            Error::Internal(Some(msg), file, line) => {
                format!("Internal Error ({file}:{line})\n{msg}")
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Error: {}", self.as_str())
    }
}

impl From<Error> for Signal {
    fn from(val: Error) -> Self {
        Signal::Error(val)
    }
}

impl<T> From<Error> for Result<T, Signal> {
    fn from(val: Error) -> Self {
        Err(Signal::Error(val))
    }
}

impl From<&str> for Signal {
    fn from(msg: &str) -> Self {
        Signal::Error(Error::Other(msg.to_string()))
    }
}

impl<T> From<Signal> for Result<T, Signal> {
    fn from(value: Signal) -> Self {
        Err(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use crate::lang::Signal;

    #[test]
    fn display_matches_r_messages() {
        assert_eq!(
            Error::SubscriptOutOfBounds.to_string(),
            "Error: subscript out of bounds"
        );
        assert_eq!(
            Error::ObjectNotSubsettable("environment").to_string(),
            "Error: object of type 'environment' is not subsettable"
        );
    }

    #[test]
    fn internal_err_records_location() {
        let r: Result<(), Signal> = internal_err!("unreachable");
        let Err(Signal::Error(Error::Internal(Some(msg), file, _))) = r else {
            panic!("expected an internal error")
        };
        assert_eq!(msg, "unreachable");
        assert!(file.ends_with("error.rs"));
    }
}
