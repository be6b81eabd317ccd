//! Askama templates for the transcript.
//!
//! Templates are plain text (`ext = "txt"`), so nothing is escaped. None of
//! them end in a newline; the session adds line breaks between results.

use askama::Template;

// ============================================================================
// Voyage creation
// ============================================================================

/// Confirmation for a new minibus voyage.
#[derive(Template)]
#[template(
    source = "Voyage {{ id }} was initialized as a minibus (2) voyage from {{ departure }} to {{ arrival }} with {{ price }} TL priced {{ regular_seats }} regular seats. Note that minibus tickets are not refundable.",
    ext = "txt"
)]
pub struct MinibusInitTemplate {
    pub id: String,
    pub departure: String,
    pub arrival: String,
    pub price: String,
    pub regular_seats: usize,
}

/// Confirmation for a new standard voyage.
#[derive(Template)]
#[template(
    source = "Voyage {{ id }} was initialized as a standard (2+2) voyage from {{ departure }} to {{ arrival }} with {{ price }} TL priced {{ regular_seats }} regular seats. Note that refunds will be {{ refund_cut }}% less than the paid amount.",
    ext = "txt"
)]
pub struct StandardInitTemplate {
    pub id: String,
    pub departure: String,
    pub arrival: String,
    pub price: String,
    pub regular_seats: usize,
    pub refund_cut: u8,
}

/// Confirmation for a new premium voyage.
#[derive(Template)]
#[template(
    source = "Voyage {{ id }} was initialized as a premium (1+2) voyage from {{ departure }} to {{ arrival }} with {{ price }} TL priced {{ regular_seats }} regular seats and {{ premium_price }} TL priced {{ premium_seats }} premium seats. Note that refunds will be {{ refund_cut }}% less than the paid amount.",
    ext = "txt"
)]
pub struct PremiumInitTemplate {
    pub id: String,
    pub departure: String,
    pub arrival: String,
    pub price: String,
    pub regular_seats: usize,
    pub premium_price: String,
    pub premium_seats: usize,
    pub refund_cut: u8,
}

// ============================================================================
// Tickets
// ============================================================================

/// Result of a sale or refund batch.
#[derive(Template)]
#[template(
    source = "Seat {{ seats }} of the Voyage {{ id }} from {{ departure }} to {{ arrival }} was successfully {{ action }} for {{ amount }} TL.",
    ext = "txt"
)]
pub struct TicketsTemplate {
    /// Seat numbers joined by `-`.
    pub seats: String,
    pub id: String,
    pub departure: String,
    pub arrival: String,
    /// `sold` or `refunded`.
    pub action: &'static str,
    pub amount: String,
}

// ============================================================================
// Layouts and reports
// ============================================================================

/// A voyage's header, seat rows and revenue.
#[derive(Template)]
#[template(
    source = "Voyage {{ id }}\n{{ departure }}-{{ arrival }}{% for row in rows %}\n{{ row }}{% endfor %}\nRevenue: {{ revenue }}",
    ext = "txt"
)]
pub struct VoyageDetailsTemplate {
    pub id: String,
    pub departure: String,
    pub arrival: String,
    /// Pre-rendered seat rows.
    pub rows: Vec<String>,
    pub revenue: String,
}

/// Cancellation notice followed by the voyage's final details.
#[derive(Template)]
#[template(
    source = "Voyage {{ id }} was successfully cancelled!\nVoyage details can be found below:\n{{ details }}",
    ext = "txt"
)]
pub struct CancelTemplate {
    pub id: String,
    pub details: String,
}

/// Details of every live voyage, each followed by a rule.
#[derive(Template)]
#[template(
    source = "Z Report:\n{{ rule }}{% for voyage in voyages %}\n{{ voyage }}\n{{ rule }}{% endfor %}{% if let Some(notice) = empty_notice %}\n{{ notice }}\n{{ rule }}{% endif %}",
    ext = "txt"
)]
pub struct ZReportTemplate {
    pub rule: &'static str,
    /// Pre-rendered voyage details.
    pub voyages: Vec<String>,
    /// Shown only when there are no voyages and the notice is enabled.
    pub empty_notice: Option<&'static str>,
}
