use crate::focus::{ElementBounds, ScrollBehavior, ScrollView};

/// A line-based scrolling list for the terminal.
///
/// Each row is a block of lines; the row's height is its line count. Offsets
/// are measured in lines.
#[derive(Debug, Clone)]
pub struct TerminalListView {
    rows: Vec<Vec<String>>,
    viewport_rows: usize,
    offset: f64,
    last_behavior: Option<ScrollBehavior>,
    /// Row drawn with the `>` marker
    highlight: Option<usize>,
}

impl TerminalListView {
    pub fn new(viewport_rows: usize) -> Self {
        Self {
            rows: Vec::new(),
            viewport_rows,
            offset: 0.0,
            last_behavior: None,
            highlight: None,
        }
    }

    /// Replace the list contents and go back to the top
    pub fn set_rows(&mut self, rows: Vec<Vec<String>>) {
        self.rows = rows;
        self.offset = 0.0;
        self.last_behavior = None;
        self.highlight = None;
    }

    /// Mark one row as the current one
    pub fn set_highlight(&mut self, row: Option<usize>) {
        self.highlight = row;
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Current scroll offset, in lines
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Behaviour of the most recent scroll, if any
    pub fn last_behavior(&self) -> Option<ScrollBehavior> {
        self.last_behavior
    }

    fn total_lines(&self) -> usize {
        self.rows.iter().map(|r| r.len().max(1)).sum()
    }

    /// Lines inside the viewport, each with the row it belongs to
    fn window(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        let start = self.offset.round() as usize;
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(index, row)| {
                let lines: Vec<&str> = if row.is_empty() {
                    vec![""]
                } else {
                    row.iter().map(String::as_str).collect()
                };
                lines.into_iter().map(move |line| (index, line))
            })
            .skip(start)
            .take(self.viewport_rows)
    }

    /// Lines inside the viewport at the current offset
    pub fn visible_lines(&self) -> Vec<&str> {
        self.window().map(|(_, line)| line).collect()
    }

    /// The viewport as printed: lines of the highlighted row start with `>`
    pub fn render(&self) -> Vec<String> {
        self.window()
            .map(|(index, line)| {
                let marker = if self.highlight == Some(index) { '>' } else { ' ' };
                format!("{} {}", marker, line)
            })
            .collect()
    }
}

impl ScrollView for TerminalListView {
    fn container_height(&self) -> Option<f64> {
        (self.viewport_rows > 0).then_some(self.viewport_rows as f64)
    }

    fn element_bounds(&self, row: usize) -> Option<ElementBounds> {
        let target = self.rows.get(row)?;
        let top: usize = self.rows[..row].iter().map(|r| r.len().max(1)).sum();
        Some(ElementBounds {
            top: top as f64,
            height: target.len().max(1) as f64,
        })
    }

    fn scroll_to(&mut self, offset: f64, behavior: ScrollBehavior) {
        // Lines past the end cannot be scrolled into view
        let max_offset = self.total_lines().saturating_sub(self.viewport_rows) as f64;
        self.offset = offset.min(max_offset).max(0.0);
        self.last_behavior = Some(behavior);
    }
}
