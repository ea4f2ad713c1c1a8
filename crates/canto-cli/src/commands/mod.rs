//! Command implementations for `cantotool`. Each function prints its result
//! to stdout and exits with status 1 on the first error.

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod config_ops;
pub mod library_ops;
pub mod note_ops;
pub mod song_ops;
pub mod translate_ops;

use unicode_width::UnicodeWidthStr;

/// Pad `s` with trailing spaces to `width` terminal columns. CJK characters
/// take two columns each.
pub(crate) fn pad(s: &str, width: usize) -> String {
    let display_width = UnicodeWidthStr::width(s);
    if display_width < width {
        format!("{}{}", s, " ".repeat(width - display_width))
    } else {
        s.to_string()
    }
}
