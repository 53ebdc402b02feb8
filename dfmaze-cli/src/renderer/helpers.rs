/// Box-drawing junction for the wall segments leaving a corner point.
pub fn line_corner(north: bool, south: bool, west: bool, east: bool) -> char {
    match (north, south, west, east) {
        (false, false, false, false) => ' ',
        (false, false, false, true) => '╶',
        (false, false, true, false) => '╴',
        (false, false, true, true) => '─',
        (false, true, false, false) => '╷',
        (false, true, false, true) => '┌',
        (false, true, true, false) => '┐',
        (false, true, true, true) => '┬',
        (true, false, false, false) => '╵',
        (true, false, false, true) => '└',
        (true, false, true, false) => '┘',
        (true, false, true, true) => '┴',
        (true, true, false, false) => '│',
        (true, true, false, true) => '├',
        (true, true, true, false) => '┤',
        (true, true, true, true) => '┼',
    }
}

/// Strips trailing whitespace of every line and terminates each with `\n`.
pub fn join_lines(lines: impl IntoIterator<Item = String>) -> String {
    lines.into_iter().fold(String::new(), |mut out, line| {
        out.push_str(line.trim_end());
        out.push('\n');
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners() {
        assert_eq!(line_corner(false, true, false, true), '┌');
        assert_eq!(line_corner(true, false, true, false), '┘');
        assert_eq!(line_corner(true, true, true, true), '┼');
        assert_eq!(line_corner(false, false, true, true), '─');
        assert_eq!(line_corner(true, true, false, false), '│');
    }

    #[test]
    fn trailing_whitespace_is_trimmed() {
        let joined = join_lines(["+---+   ".to_string(), "    ".to_string()]);
        assert_eq!(joined, "+---+\n\n");
    }
}
