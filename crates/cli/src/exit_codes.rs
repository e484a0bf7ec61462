//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                       |
//! |------|-----------------------------------------------|
//! | 0    | Success                                       |
//! | 1    | General error (unreadable input, bad output)  |
//! | 2    | Usage error (bad args, unknown row or column) |
//! | 3    | Selection is not a single-band rectangle      |
//! | 4    | Paste cancelled at a prompt                   |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unresolvable row paths or cells.
pub const EXIT_USAGE: u8 = 2;

/// `copy` / `validate`: the selection cannot be copied.
pub const EXIT_INVALID_SELECTION: u8 = 3;

/// `paste`: a prompt was answered with cancel. Cells written before the
/// prompt stay written and are still reported.
pub const EXIT_PASTE_CANCELLED: u8 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_USAGE,
            EXIT_INVALID_SELECTION,
            EXIT_PASTE_CANCELLED,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
