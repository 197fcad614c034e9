#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    /// Total width to fit into; columns are narrowed widest first.
    pub max_width: Option<usize>,
}

const MIN_COLUMN_WIDTH: usize = 4;

/// Render an aligned table for string rows. Numeric cells are right-aligned.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
                .max(MIN_COLUMN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| format_cell(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");
    let header_line = header_line.trim_end().to_string();

    let divider = "-".repeat(header_line.chars().count());

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let truncated = truncate_text(value, *width);
                let numeric = looks_numeric(&truncated);
                format_cell(&truncated, *width, numeric)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    });

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line);
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].len().max(MIN_COLUMN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
        total -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }

    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

fn format_cell(value: &str, width: usize, numeric: bool) -> String {
    let pad = width.saturating_sub(value.chars().count());
    if numeric {
        format!("{}{}", " ".repeat(pad), value)
    } else {
        format!("{}{}", value, " ".repeat(pad))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec!["1".into(), "What is 2+2?".into()],
            vec!["120".into(), "Name the powerhouse of the cell".into()],
        ]
    }

    #[test]
    fn numbers_are_right_aligned() {
        let table = render_table(&["id", "question"], &rows(), TableOptions { max_width: None });
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[2], "   1  What is 2+2?");
        assert_eq!(lines[3], " 120  Name the powerhouse of the cell");
    }

    #[test]
    fn wide_columns_are_truncated_to_fit() {
        let table = render_table(
            &["id", "question"],
            &rows(),
            TableOptions {
                max_width: Some(20),
            },
        );

        for line in table.lines() {
            assert!(line.chars().count() <= 20, "line too wide: {line}");
        }
        assert!(table.contains('…'));
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let table = render_table(
            &["id", "question"],
            &[vec!["7".into()]],
            TableOptions { max_width: None },
        );
        assert!(table.lines().nth(2).is_some_and(|line| line.ends_with('-')));
    }
}
