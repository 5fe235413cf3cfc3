//! Priced invoice documents for external renderers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

use crate::ledger::Payment;
use crate::tax::Totals;
use crate::ticket::{TicketId, TicketStatus};
use crate::utils;

/// A fully priced ticket document: everything a renderer needs to produce
/// an invoice, assembled in one pass so the renderer never touches the
/// store.
#[derive(Debug, Clone, Serialize)]
pub struct TicketInvoice {
    pub ticket_id: TicketId,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub boat: String,
    pub date_opened: NaiveDate,
    pub status: TicketStatus,
    pub description: Option<String>,
    pub parts: Vec<InvoicePartLine>,
    pub labor: Vec<InvoiceLaborLine>,
    pub totals: Totals,
    pub payment_method: Option<String>,
    pub payments: Vec<Payment>,
    pub balance_due: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoicePartLine {
    pub part_number: Option<String>,
    pub name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub line_total: Decimal,
    pub taxable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceLaborLine {
    pub mechanic_name: String,
    pub description: Option<String>,
    pub hours: Decimal,
    pub rate: Decimal,
    pub line_total: Decimal,
}

/// Flat CSV row, one per invoice line.
#[derive(Debug, Serialize)]
struct CsvLine<'a> {
    item_type: &'static str,
    description: &'a str,
    quantity: Decimal,
    unit_price: Decimal,
    line_total: Decimal,
    taxable: bool,
}

/// Write the invoice's part and labor lines as CSV, parts first, matching
/// the order the totals were computed in.
pub fn write_invoice_csv<W: Write>(invoice: &TicketInvoice, writer: W) -> anyhow::Result<()> {
    let part_lines = invoice.parts.iter().map(|line| CsvLine {
        item_type: "part",
        description: &line.name,
        quantity: line.quantity,
        unit_price: line.unit_price,
        line_total: line.line_total,
        taxable: line.taxable,
    });
    let labor_lines = invoice.labor.iter().map(|line| CsvLine {
        item_type: "labor",
        description: line.description.as_deref().unwrap_or(&line.mechanic_name),
        quantity: line.hours,
        unit_price: line.rate,
        line_total: line.line_total,
        taxable: true,
    });
    utils::write_csv(part_lines.chain(labor_lines), writer)
}
