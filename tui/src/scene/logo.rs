//! Block-letter logo

/// Logo rows; each visual letter row is doubled for height
pub const LOGO_LINES: [&str; 14] = [
    "        ▄▄▄▄▄▄▄▄      ▄▄▄▄                      ▄▄▄▄          ▄▄▄▄        ▄▄▄▄    ▄▄▄▄▄▄▄▄▄▄          ▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄",
    "        ▄▄▄▄▄▄▄▄      ▄▄▄▄                      ▄▄▄▄          ▄▄▄▄        ▄▄▄▄    ▄▄▄▄▄▄▄▄▄▄          ▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄▄",
    "    ████▀▀▀▀▀▀▀▀██    ████                    ████████        ████        ████    ████▀▀▀▀▀▀████      ████▀▀▀▀▀▀▀▀▀▀▀▀",
    "    ████▀▀▀▀▀▀▀▀██    ████                    ████████        ████        ████    ████▀▀▀▀▀▀████      ████▀▀▀▀▀▀▀▀▀▀▀▀",
    "  ████▀▀              ████                    ████████        ████        ████    ████        ████    ████              ",
    "  ████▀▀              ████                    ████████        ████        ████    ████        ████    ████              ",
    "  ████                ████                  ████    ████      ████        ████    ████        ████    ██████████████  ",
    "  ████                ████                  ████    ████      ████        ████    ████        ████    ██████████████  ",
    "  ████▄▄              ████                  ████████████      ████        ████    ████        ████    ████              ",
    "  ████▄▄              ████                  ████████████      ████        ████    ████        ████    ████              ",
    "    ████▄▄▄▄▄▄▄▄██    ████▄▄▄▄▄▄▄▄▄▄▄▄    ▄▄████    ████▄▄    ▀▀████▄▄▄▄████▀▀    ████▄▄▄▄▄▄████      ████▄▄▄▄▄▄▄▄▄▄▄▄",
    "    ████▄▄▄▄▄▄▄▄██    ████▄▄▄▄▄▄▄▄▄▄▄▄    ▄▄████    ████▄▄    ▀▀████▄▄▄▄████▀▀    ████▄▄▄▄▄▄████      ████▄▄▄▄▄▄▄▄▄▄▄▄",
    "        ▀▀▀▀▀▀▀▀      ▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀    ▀▀▀▀        ▀▀▀▀        ▀▀▀▀▀▀▀▀        ▀▀▀▀▀▀▀▀▀▀          ▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀",
    "        ▀▀▀▀▀▀▀▀      ▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀    ▀▀▀▀        ▀▀▀▀        ▀▀▀▀▀▀▀▀        ▀▀▀▀▀▀▀▀▀▀          ▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀",
];

/// Widest logo row in terminal columns
pub fn logo_width() -> usize {
    use unicode_width::UnicodeWidthStr;
    LOGO_LINES.iter().map(|line| line.width()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logo_width() {
        assert_eq!(logo_width(), 120);
    }

    #[test]
    fn test_rows_come_in_pairs() {
        for pair in LOGO_LINES.chunks(2) {
            assert_eq!(pair[0], pair[1]);
        }
    }
}
