/// Emit a structured event to stderr when built with the `trace` feature
///
/// Events are a name followed by `key=value` pairs:
///
/// ```text
/// [subscript] event=miss site=[ container=integer/0 operands=1
/// ```
///
/// Without the feature the macro expands to nothing and its arguments are
/// not evaluated.
///
macro_rules! trace {
    ($event:literal $(, $key:ident = $value:expr)* $(,)?) => {
        #[cfg(feature = "trace")]
        {
            eprint!("[subscript] event={}", $event);
            $( eprint!(" {}={}", stringify!($key), $value); )*
            eprintln!();
        }
    };
}

pub(crate) use trace;
