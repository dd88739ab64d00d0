//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

use tonika_core::{AnalysisResult, BatchRow, Sentiment};
use tonika_dashboard::views::{BatchViews, ClassWords, MonthlyCount, SentimentShare};
use tonika_dashboard::Filters;

const BAR_WIDTH: usize = 30;

/// Print a single analysis result.
pub fn print_result(result: &AnalysisResult) {
    let name = result.sentiment.to_string();
    println!("{}: {}", "Sentiment".bold(), sentiment_colored(result.sentiment, &name));
    println!("{}: {}", "Confidence".bold(), format_confidence(result.confidence));
}

/// Print scored rows as a table.
pub fn print_rows_table(rows: &[&BatchRow], filters: &Filters) {
    if rows.is_empty() {
        if filters.is_active() {
            println!("{}", "No rows match the current filters.".dimmed());
        } else {
            println!("{}", "No rows found.".dimmed());
        }
        return;
    }

    let width = term_width();
    // Fixed columns: id 12, date 20, sentiment 9, confidence 10, plus separators
    let text_width = width.saturating_sub(12 + 20 + 9 + 10 + 4).max(20);

    println!(
        "{} {} {} {} {}",
        pad_right("UserSenderId", 12),
        pad_right("SubmitDate", 20),
        pad_right("MessageText", text_width),
        pad_right("Sentiment", 9),
        "Confidence"
    );
    println!("{}", "─".repeat((12 + 20 + 9 + 10 + 4 + text_width).min(width)).dimmed());

    for row in rows {
        let sentiment = pad_right(&row.sentiment.to_string(), 9);
        let message = single_line(row.message().unwrap_or_default());
        println!(
            "{} {} {} {} {}",
            pad_right(&truncate_visual(&cell_text(&row.user_sender_id), 12), 12),
            pad_right(&truncate_visual(&cell_text(&row.submit_date), 20), 20),
            pad_right(&truncate_visual(&message, text_width), text_width),
            sentiment_colored(row.sentiment, &sentiment),
            format_confidence(row.confidence)
        );
    }

    if filters.is_active() {
        let mut active = Vec::new();
        if let Some(keyword) = &filters.keyword {
            active.push(format!("keyword '{}'", keyword));
        }
        if let Some(sentiment) = filters.sentiment {
            active.push(format!("class {}", sentiment));
        }
        println!();
        let summary = format!("{} rows, filtered by {}", rows.len(), active.join(" and "));
        println!("{}", summary.dimmed());
    }
}

/// Print chart data for a batch.
pub fn print_views(views: &BatchViews) {
    println!();
    println!("{}", "Class distribution".bold());
    print_distribution(&views.distribution);

    println!();
    println!("{}", "Messages per month".bold());
    print_monthly(&views.monthly);

    println!();
    println!("{}", "Top words".bold());
    print_top_words(&views.top_words);
}

fn print_distribution(shares: &[SentimentShare]) {
    if shares.is_empty() {
        println!("{}", "  No rows to chart.".dimmed());
        return;
    }
    for share in shares {
        let name = pad_right(&share.sentiment.to_string(), 8);
        println!(
            "  {} {} {:>5.1}% ({})",
            sentiment_colored(share.sentiment, &name),
            sentiment_colored(share.sentiment, &bar(share.share, BAR_WIDTH)),
            share.share * 100.0,
            share.count
        );
    }
}

fn print_monthly(months: &[MonthlyCount]) {
    if months.is_empty() {
        println!("{}", "  No dated rows.".dimmed());
        return;
    }
    for month in months {
        let parts: Vec<String> = Sentiment::ALL
            .into_iter()
            .filter(|s| month.count(*s) > 0)
            .map(|s| format!("{} {}", s, month.count(s)))
            .collect();
        println!(
            "  {}  {:>5}  {}",
            month.month.cyan(),
            month.total,
            parts.join(", ").dimmed()
        );
    }
}

fn print_top_words(classes: &[ClassWords]) {
    if classes.is_empty() {
        println!("{}", "  No words to count.".dimmed());
        return;
    }
    for class in classes {
        let words: Vec<String> = class
            .words
            .iter()
            .map(|w| format!("{} ({})", w.word, w.count))
            .collect();
        println!(
            "  {} {}",
            sentiment_colored(class.sentiment, &pad_right(&class.sentiment.to_string(), 8)),
            words.join(", ")
        );
    }
}

/// Print a recoverable problem without leaving the current screen.
pub fn print_warning(message: &str) {
    println!("{} {}", "!".yellow().bold(), message.yellow());
}

fn sentiment_colored(sentiment: Sentiment, text: &str) -> ColoredString {
    match sentiment {
        Sentiment::Good => text.green(),
        Sentiment::Neutral => text.blue(),
        Sentiment::Bad => text.red(),
        Sentiment::Unknown => text.dimmed(),
    }
}

fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

fn bar(share: f64, width: usize) -> String {
    let filled = (share.clamp(0.0, 1.0) * width as f64).round() as usize;
    "█".repeat(filled)
}

/// Render a pass-through cell the way the table shows it.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(100)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}
