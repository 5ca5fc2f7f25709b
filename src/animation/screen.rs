//! A tiny virtual terminal for tests.
//!
//! Interprets the subset of control sequences the animations emit (carriage
//! return, newline, cursor movement, line and screen clearing) on an unbounded
//! grid, so tests can assert on what a user would actually see.

#[derive(Debug, Clone, Default)]
pub struct Screen {
    rows: Vec<Vec<char>>,
    row: usize,
    col: usize,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed terminal output. Newlines behave like a cooked tty (`\r\n`).
    pub fn feed(&mut self, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' => self.col = 0,
                '\n' => {
                    self.row += 1;
                    self.col = 0;
                }
                '\x1b' => {
                    if chars.peek() != Some(&'[') {
                        continue;
                    }
                    chars.next();
                    let mut params = String::new();
                    let mut action = None;
                    for c in chars.by_ref() {
                        if c.is_ascii_digit() || c == ';' || c == '?' {
                            params.push(c);
                        } else {
                            action = Some(c);
                            break;
                        }
                    }
                    if let Some(action) = action {
                        self.apply(action, &params);
                    }
                }
                c => self.put(c),
            }
        }
    }

    fn apply(&mut self, action: char, params: &str) {
        if params.starts_with('?') {
            return;
        }
        let args: Vec<usize> = params
            .split(';')
            .map(|p| p.parse().unwrap_or(0))
            .collect();
        let n = args.first().copied().unwrap_or(0);
        let count = n.max(1);
        match action {
            'A' => self.row = self.row.saturating_sub(count),
            'B' => self.row += count,
            'C' => self.col += count,
            'D' => self.col = self.col.saturating_sub(count),
            'G' => self.col = count - 1,
            'H' => {
                self.row = count - 1;
                self.col = args.get(1).copied().unwrap_or(1).max(1) - 1;
            }
            'K' => {
                let (row, col) = (self.row, self.col);
                let line = self.line_mut(row);
                match n {
                    0 => line.truncate(col),
                    1 => line.iter_mut().take(col + 1).for_each(|c| *c = ' '),
                    _ => line.clear(),
                }
            }
            'J' => match n {
                0 => {
                    let (row, col) = (self.row, self.col);
                    self.line_mut(row).truncate(col);
                    self.rows.truncate(row + 1);
                }
                _ => self.rows.clear(),
            },
            _ => {}
        }
    }

    fn line_mut(&mut self, row: usize) -> &mut Vec<char> {
        if self.rows.len() <= row {
            self.rows.resize(row + 1, Vec::new());
        }
        &mut self.rows[row]
    }

    fn put(&mut self, c: char) {
        let col = self.col;
        let line = self.line_mut(self.row);
        if line.len() <= col {
            line.resize(col + 1, ' ');
        }
        line[col] = c;
        self.col += 1;
    }

    /// Visible text of one row, without trailing blanks.
    pub fn line(&self, row: usize) -> String {
        self.rows
            .get(row)
            .map(|line| line.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// All visible rows, dropping trailing blank rows.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = (0..self.rows.len()).map(|row| self.line(row)).collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines
    }

    /// Cursor position as `(row, column)`.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carriage_return_overwrites() {
        let mut screen = Screen::new();
        screen.feed("#####\r##");
        assert_eq!(screen.line(0), "#####");
        assert_eq!(screen.cursor(), (0, 2));
    }

    #[test]
    fn test_clear_line_and_cursor_up() {
        let mut screen = Screen::new();
        screen.feed("one\ntwo\nthree\x1b[2A\r\x1b[2K");
        assert_eq!(screen.lines(), vec!["", "two", "three"]);
        assert_eq!(screen.cursor(), (0, 0));
    }

    #[test]
    fn test_clear_to_end_of_screen() {
        let mut screen = Screen::new();
        screen.feed("keep\nab\ncd\x1b[1A\r\x1b[J");
        assert_eq!(screen.lines(), vec!["keep"]);
        assert_eq!(screen.cursor(), (1, 0));
    }

    #[test]
    fn test_clear_until_newline() {
        let mut screen = Screen::new();
        screen.feed("=====|\r==\\\x1b[K");
        assert_eq!(screen.line(0), "==\\");
    }
}
