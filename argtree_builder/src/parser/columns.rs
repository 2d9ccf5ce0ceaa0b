#[cfg(feature = "tracing_debug")]
use tracing::debug;

// We'll target 95% of the total width, to leave the terminal some breathing room.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

pub(crate) const PADDING_WIDTH: usize = 3;

/// Lays out two columns: a left column of fixed width, and a middle column which wraps its words.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ColumnRenderer {
    left: usize,
    middle: usize,
}

impl ColumnRenderer {
    /// Produce a renderer which fits within `total_width`, if that is possible.
    pub(crate) fn guided(indent: usize, left: usize, middle: usize, total_width: usize) -> Self {
        let non_middle = indent + left + PADDING_WIDTH;
        let target_total_width = (total_width as f64 * TARGET_TOTAL_FACTOR) as usize;
        let guided_middle = std::cmp::max(middle, MINIMUM_MIDDLE_WIDTH);

        if guided_middle + non_middle <= target_total_width {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} and middle fit within the target total {target_total_width}.  Selecting middle: {guided_middle}.");
            }

            Self::new(left, guided_middle)
        } else if non_middle < total_width {
            let calculated_middle = std::cmp::max(total_width - non_middle, MINIMUM_MIDDLE_WIDTH);
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} fit within the total {total_width}.  Selecting middle: {calculated_middle}.");
            }

            Self::new(left, calculated_middle)
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} do not fit within the total {total_width}.  Selecting middle: {MINIMUM_MIDDLE_WIDTH}.");
            }

            Self::new(left, MINIMUM_MIDDLE_WIDTH)
        }
    }

    pub(crate) fn new(left: usize, middle: usize) -> Self {
        // The middle must be at least 2, so that words may be hyphenated.
        Self {
            left,
            middle: std::cmp::max(middle, 2),
        }
    }

    pub(crate) fn render(&self, indent: usize, left: &str, middle: &str) -> Vec<String> {
        let left_width = self.left;
        let padding = " ".repeat(PADDING_WIDTH);
        let mut out = Vec::default();

        for (i, part) in chunk(middle, self.middle).iter().enumerate() {
            if i == 0 {
                out.push(format!("{:indent$}{left:left_width$}{padding}{part}", ""));
            } else {
                out.push(format!("{:indent$}{:left_width$}{padding}{part}", "", ""));
            }
        }

        if out.is_empty() {
            out.push(format!("{:indent$}{left}", ""));
        }

        out
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split_whitespace() {
        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + word.chars().count() + 1 <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let characters: Vec<char> = word.chars().collect();
    let increment = width - 1;
    let mut left = 0;

    while characters.len() - left > width {
        let part: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{part}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}
