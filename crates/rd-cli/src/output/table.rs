//! Plain-text tables sized to the terminal.

const MIN_COLUMN: usize = 4;
const GAP: &str = "  ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: usize,
    pub color: bool,
}

/// Render a header row, a rule, and the body rows.
///
/// When the natural width exceeds `max_width`, the widest columns shrink first
/// and overflowing cells end with `~`.
pub fn render(headers: &[String], rows: &[Vec<String>], options: TableOptions) -> String {
    let widths = fit_widths(&natural_widths(headers, rows), options.max_width);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(join_row(headers, &widths, false));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join(GAP),
    );
    for row in rows {
        lines.push(join_row(row, &widths, options.color));
    }
    lines.join("\n")
}

fn natural_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn fit_widths(natural: &[usize], max_width: usize) -> Vec<usize> {
    let mut widths = natural.to_vec();
    let budget = max_width.saturating_sub(GAP.len() * widths.len().saturating_sub(1));
    while widths.iter().sum::<usize>() > budget {
        let Some((idx, widest)) = widths
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|(_, w)| *w)
        else {
            break;
        };
        if widest <= MIN_COLUMN {
            break;
        }
        widths[idx] = widest - 1;
    }
    widths
}

fn join_row(cells: &[String], widths: &[usize], color: bool) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let text = truncate(cells.get(i).map_or("", String::as_str), *width);
            let padding = " ".repeat(width.saturating_sub(text.chars().count()));
            if color {
                format!("{}{padding}", colorize_status(&text))
            } else {
                format!("{text}{padding}")
            }
        })
        .collect::<Vec<_>>()
        .join(GAP)
        .trim_end()
        .to_string()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut = text.chars().take(width.saturating_sub(1)).collect::<String>();
    cut.push('~');
    cut
}

fn colorize_status(text: &str) -> String {
    let code = match text {
        "completed" => "32",
        "active" | "in_review" => "36",
        "on_hold" | "pending" | "planned" => "33",
        "cancelled" | "removed" => "31",
        _ => return text.to_string(),
    };
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}
