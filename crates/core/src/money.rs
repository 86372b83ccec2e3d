//! Money is held as integer cents. Prices are GST-inclusive.

use serde::Serialize;

/// Goods and services tax rate, in basis points.
pub const GST_RATE_BP: i64 = 900;

/// Format cents as a plain decimal string, e.g. `2499` -> `"24.99"`.
pub fn cents_to_display(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// The GST portion of a GST-inclusive total, rounded half-up to the cent.
///
/// `gst = total * rate / (1 + rate)`, computed in `i128` so any `i64` total
/// is accepted. The result is never larger in magnitude than the total.
pub fn gst_component(total_cents: i64) -> i64 {
    let numerator = i128::from(total_cents) * i128::from(GST_RATE_BP);
    let denominator = i128::from(10_000 + GST_RATE_BP);
    ((2 * numerator + denominator) / (2 * denominator)) as i64
}

/// Amounts stored on a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReceiptBreakdown {
    pub net_cents: i64,
    pub gst_cents: i64,
    pub total_cents: i64,
}

pub fn receipt_breakdown(total_cents: i64) -> ReceiptBreakdown {
    let gst_cents = gst_component(total_cents);
    ReceiptBreakdown {
        net_cents: total_cents - gst_cents,
        gst_cents,
        total_cents,
    }
}
