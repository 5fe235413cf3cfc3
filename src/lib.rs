//! # marinebill
//!
//! Billing and tax computation engine for a marine repair shop: customers,
//! boats and engines, repair tickets and estimates, parts and labor
//! charges, equipment sales, and payments.
//!
//! The crate is a library of pure and near-pure synchronous functions.
//! The computation core ([`calculate_tax`], [`resolve_labor_rate`],
//! [`ticket_totals`], [`estimate_totals`], [`balance_due`]) operates on
//! plain data and injected snapshots; [`ShopDb`] is the in-memory
//! reference store providing the collaborator surface (record lookup,
//! child-record readers, the rate table, totals write-back, the payment
//! ledger) that a real persistence layer would implement.
//!
//! Totals are never recomputed automatically: after mutating parts, labor,
//! or line items the caller re-invokes the aggregator. Overlapping
//! recomputes race, and the later write wins.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use marinebill::{CustomerDraft, MechanicDraft, ShopDb};
//!
//! let mut shop = ShopDb::new();
//! let customer = shop.create_customer(CustomerDraft {
//!     name: "Hebert".to_string(),
//!     ..CustomerDraft::default()
//! })?;
//! let boat = shop.create_boat(customer, "Skeeter", "ZX225", None)?;
//! let mechanic = shop.create_mechanic(MechanicDraft {
//!     name: "Earl".to_string(),
//!     hourly_rate: Some(dec!(65.00)),
//! })?;
//!
//! let opened = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
//! let ticket = shop.create_ticket(customer, boat, None, None, opened)?;
//! shop.add_ticket_labor(ticket, mechanic, dec!(2), None, None)?;
//!
//! let totals = shop.calculate_ticket_totals(ticket, None, None)?;
//! assert_eq!(totals.subtotal, dec!(130.00));
//! # Ok::<(), marinebill::ShopError>(())
//! ```

pub mod boat;
pub mod customer;
pub mod engine;
pub mod error;
pub mod estimate;
pub mod inventory;
pub mod invoice;
pub mod ledger;
pub mod mechanic;
pub mod parts;
pub mod rates;
pub mod shop;
pub mod tax;
pub mod ticket;
pub mod totals;
pub mod utils;
pub mod validate;

// Flat public surface for domain types and functions.
pub use boat::{Boat, BoatId};
pub use customer::{Customer, CustomerDraft, CustomerId};
pub use engine::{Engine, EngineClass, EngineId};
pub use error::{Result, ShopError};
pub use estimate::{Estimate, EstimateDraft, EstimateId, EstimateLineItem, LineItemKind};
pub use inventory::{NewEngine, NewEngineId, SaleTerms, StockStatus, REGISTRATION_WINDOW_DAYS};
pub use invoice::{write_invoice_csv, InvoiceLaborLine, InvoicePartLine, TicketInvoice};
pub use ledger::{balance_due, Payment};
pub use mechanic::{Mechanic, MechanicDraft, MechanicId};
pub use parts::{Part, PartDraft, PartId};
pub use rates::{resolve_labor_rate, RateTable};
pub use shop::{SeedData, ShopDb};
pub use tax::{calculate_tax, ChargeLine, Totals, TAX_RATE};
pub use ticket::{LaborEntry, PartUsage, Ticket, TicketId, TicketStatus};
pub use totals::{estimate_totals, ticket_totals, LaborCharge, PartCharge, TicketCharges};
