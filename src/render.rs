//! Markup builders
//!
//! Produces the fragments the loaders assign to `innerHTML`: holdings table
//! rows, log viewer lines, their empty/error states and toast bodies.
//! Every server-supplied string is escaped here.

use crate::dom::escape_html;
use crate::format::{format_currency, format_number, sign_prefix};
use crate::model::{Country, Holding};

/// Columns of the holdings table
pub const HOLDINGS_COLUMNS: usize = 7;

pub const HOLDINGS_EMPTY_MESSAGE: &str = "보유 중인 종목이 없습니다.";
pub const LOGS_EMPTY_MESSAGE: &str = "로그가 없습니다.";
pub const LOGS_ERROR_MESSAGE: &str = "로그를 불러올 수 없습니다.";

/// `positive` / `negative` styling class for a signed value
pub fn trend_class(value: f64) -> &'static str {
    if value >= 0.0 {
        "positive"
    } else {
        "negative"
    }
}

/// Holdings count label, e.g. `3개`
pub fn holdings_count_label(count: usize) -> String {
    format!("{}개", count)
}

/// Single placeholder row shown when there are no holdings
pub fn holdings_empty_row() -> String {
    format!(
        r#"<tr><td colspan="{}" class="text-center text-gray-500 py-8">{}</td></tr>"#,
        HOLDINGS_COLUMNS, HOLDINGS_EMPTY_MESSAGE
    )
}

/// One `<tr>` per holding, in the order given
pub fn holdings_rows(holdings: &[Holding], country: Country) -> String {
    holdings
        .iter()
        .map(|h| holding_row(h, country))
        .collect::<Vec<_>>()
        .join("\n")
}

fn holding_row(holding: &Holding, country: Country) -> String {
    let sign = sign_prefix(holding.profit_loss);
    let (trend, badge) = if holding.is_profit() {
        ("positive", "badge-success")
    } else {
        ("negative", "badge-danger")
    };

    format!(
        concat!(
            "<tr>",
            r#"<td class="font-medium">{symbol}</td>"#,
            "<td>{name}</td>",
            r#"<td class="text-right">{quantity}주</td>"#,
            r#"<td class="text-right">{avg_price}</td>"#,
            r#"<td class="text-right font-medium">{current_price}</td>"#,
            r#"<td class="text-right {trend} font-medium">{sign}{profit_loss}</td>"#,
            r#"<td class="text-right"><span class="badge {badge}">{sign}{rate}%</span></td>"#,
            "</tr>"
        ),
        symbol = escape_html(&holding.symbol),
        name = escape_html(&holding.name),
        quantity = format_number(Some(holding.quantity), 0),
        avg_price = format_currency(Some(holding.avg_price), country),
        current_price = format_currency(Some(holding.current_price), country),
        trend = trend,
        sign = sign,
        profit_loss = format_currency(Some(holding.profit_loss), country),
        badge = badge,
        rate = format_number(Some(holding.profit_loss_rate), 2),
    )
}

/// Log viewer lines, each trimmed and escaped
pub fn log_lines<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(|line| {
            format!(
                r#"<div class="log-line">{}</div>"#,
                escape_html(line.as_ref().trim())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn logs_empty() -> String {
    format!(r#"<div class="text-center text-gray-400">{}</div>"#, LOGS_EMPTY_MESSAGE)
}

pub fn logs_error() -> String {
    format!(r#"<div class="text-center text-red-400">{}</div>"#, LOGS_ERROR_MESSAGE)
}

/// Toast body: icon, escaped message and close control
pub fn toast_body(icon: &str, message: &str) -> String {
    format!(
        r#"<span class="toast-icon">{}</span><span class="toast-message">{}</span><button class="toast-close">×</button>"#,
        icon,
        escape_html(message)
    )
}
