// Column planning for the calendar grid
//
// Decides how many habit columns fit the terminal and which window of habits
// is visible, so the cursor always stays on screen. Keeps the width math out
// of the render code.

use unicode_width::UnicodeWidthChar;

/// Width of the leading day-number column.
pub const DAY_COL_WIDTH: u16 = 5;

/// Fixed width of one habit column (checkbox + padding, header truncated).
pub const HABIT_COL_WIDTH: u16 = 12;

/// A horizontal window over the habit columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPlan {
    /// Index of the first visible habit column.
    pub first: usize,
    /// Number of visible habit columns (0 when there are no habits).
    pub visible: usize,
}

/// Plan the visible habit columns for the given content width.
///
/// The window slides only as far as needed: the cursor column is always
/// inside the window, pinned to the right edge once it scrolls past the
/// first page.
pub fn plan_columns(content_width: u16, habit_count: usize, cursor: usize) -> ColumnPlan {
    if habit_count == 0 {
        return ColumnPlan {
            first: 0,
            visible: 0,
        };
    }

    let avail = content_width.saturating_sub(DAY_COL_WIDTH);
    let fit = (avail / HABIT_COL_WIDTH).max(1) as usize;
    let visible = fit.min(habit_count);

    let cursor = cursor.min(habit_count - 1);
    let first = if cursor < visible {
        0
    } else {
        cursor + 1 - visible
    };

    ColumnPlan { first, visible }
}

/// Truncate a habit name to at most `max` display columns, appending an
/// ellipsis when anything was cut. Wide characters (CJK, emoji) count as
/// their rendered width.
pub fn truncate_name(name: &str, max: u16) -> String {
    let max = max as usize;
    let mut width = 0usize;
    let mut out = String::new();
    for c in name.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max {
            // Reserve one column for the ellipsis; drop the previous char
            // if needed to make room.
            while !out.is_empty() && width + 1 > max {
                let last = out.pop().unwrap();
                width -= last.width().unwrap_or(0);
            }
            out.push('…');
            return out;
        }
        width += w;
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_habit_list_has_no_columns() {
        let plan = plan_columns(80, 0, 0);
        assert_eq!(plan.visible, 0);
    }

    #[test]
    fn all_columns_fit_on_a_wide_terminal() {
        // 5 day col + 3 * 12 = 41 needed
        let plan = plan_columns(80, 3, 0);
        assert_eq!(plan, ColumnPlan { first: 0, visible: 3 });
    }

    #[test]
    fn window_slides_to_keep_cursor_visible() {
        // avail = 41 - 5 = 36 -> 3 columns fit, 8 habits total, cursor
        // pinned to the right edge of the window
        let plan = plan_columns(41, 8, 5);
        assert_eq!(plan, ColumnPlan { first: 3, visible: 3 });
    }

    #[test]
    fn first_page_does_not_scroll() {
        let plan = plan_columns(41, 8, 2);
        assert_eq!(plan, ColumnPlan { first: 0, visible: 3 });
    }

    #[test]
    fn at_least_one_column_on_tiny_terminals() {
        // The single visible column is the cursor's
        let plan = plan_columns(10, 4, 3);
        assert_eq!(plan, ColumnPlan { first: 3, visible: 1 });
    }

    #[test]
    fn truncate_short_names_unchanged() {
        assert_eq!(truncate_name("Read", 10), "Read");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_name("Meditation", 6), "Medit…");
    }

    #[test]
    fn truncate_respects_wide_characters() {
        // Each CJK char is 2 columns wide
        let truncated = truncate_name("日本語の勉強", 5);
        assert_eq!(truncated, "日本…");
    }
}
