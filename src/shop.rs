//! In-memory shop store and service operations.
//!
//! [`ShopDb`] owns every record and implements the collaborator surface
//! the billing engine depends on: customer lookup, child-record readers,
//! the rate table, the equipment-sale lookup, totals write-back, and the
//! payment store. Persistence behind a real database is the
//! surrounding application's concern; this store is the reference
//! implementation used by it and by the test suite.
//!
//! All operations are synchronous and take no locks. A totals recompute is
//! a read-then-write with no atomicity guarantee: two overlapping
//! gather/compute/apply cycles race and the later [`ShopDb::apply_ticket_totals`]
//! wins, silently discarding the earlier result.

use std::collections::BTreeMap;
use std::io::Read;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::boat::{Boat, BoatId};
use crate::customer::{Customer, CustomerDraft, CustomerId};
use crate::engine::{Engine, EngineId};
use crate::error::{Result, ShopError};
use crate::estimate::{Estimate, EstimateDraft, EstimateId, EstimateLineItem, LineItemKind};
use crate::inventory::{NewEngine, NewEngineId, SaleTerms, StockStatus};
use crate::invoice::{InvoiceLaborLine, InvoicePartLine, TicketInvoice};
use crate::ledger::{self, Payment};
use crate::mechanic::{Mechanic, MechanicDraft, MechanicId};
use crate::parts::{Part, PartDraft, PartId};
use crate::rates::{resolve_labor_rate, RateTable};
use crate::tax::Totals;
use crate::ticket::{LaborEntry, PartUsage, Ticket, TicketId, TicketStatus};
use crate::totals::{self, LaborCharge, PartCharge, TicketCharges};
use crate::validate;

/// Seed records loaded at application startup.
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub rate_table: Option<RateTable>,
    #[serde(default)]
    pub customers: Vec<CustomerDraft>,
    #[serde(default)]
    pub mechanics: Vec<MechanicDraft>,
    #[serde(default)]
    pub parts: Vec<PartDraft>,
}

#[derive(Debug, Default)]
pub struct ShopDb {
    customers: BTreeMap<CustomerId, Customer>,
    mechanics: BTreeMap<MechanicId, Mechanic>,
    parts: BTreeMap<PartId, Part>,
    boats: BTreeMap<BoatId, Boat>,
    engines: BTreeMap<EngineId, Engine>,
    new_engines: BTreeMap<NewEngineId, NewEngine>,
    tickets: BTreeMap<TicketId, Ticket>,
    estimates: BTreeMap<EstimateId, Estimate>,
    payments: Vec<Payment>,
    rate_table: RateTable,
}

impl ShopDb {
    /// Create an empty store. The rate table is installed with shop
    /// defaults here, once, rather than lazily on every lookup.
    pub fn new() -> Self {
        ShopDb::default()
    }

    /// Load seed records (rate table, customers, mechanics, parts) from
    /// JSON, typically once at application startup.
    pub fn load_seed<R: Read>(&mut self, reader: R) -> anyhow::Result<()> {
        let seed: SeedData = serde_json::from_reader(reader)?;
        if let Some(rates) = seed.rate_table {
            self.rate_table = rates;
        }
        for draft in seed.customers {
            self.create_customer(draft)?;
        }
        for draft in seed.mechanics {
            self.create_mechanic(draft)?;
        }
        for draft in seed.parts {
            self.create_part(draft)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Rate table
    // ------------------------------------------------------------------

    pub fn rate_table(&self) -> &RateTable {
        &self.rate_table
    }

    /// Replace the rate table. Existing labor entries keep the rate they
    /// were stamped with.
    pub fn set_rate_table(&mut self, rates: RateTable) {
        self.rate_table = rates;
    }

    // ------------------------------------------------------------------
    // Customers
    // ------------------------------------------------------------------

    pub fn create_customer(&mut self, draft: CustomerDraft) -> Result<CustomerId> {
        let id = CustomerId(self.customers.last_key_value().map_or(1, |(id, _)| id.0 + 1));
        let customer = build_customer(id, draft)?;
        debug!("created customer {id} ({})", customer.name);
        self.customers.insert(id, customer);
        Ok(id)
    }

    /// Replace a customer's fields wholesale, re-running validation.
    pub fn update_customer(&mut self, id: CustomerId, draft: CustomerDraft) -> Result<()> {
        if !self.customers.contains_key(&id) {
            return Err(ShopError::not_found("customer", id.0));
        }
        let customer = build_customer(id, draft)?;
        self.customers.insert(id, customer);
        Ok(())
    }

    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(&id)
    }

    /// All customers, ordered by name.
    pub fn customers(&self) -> Vec<&Customer> {
        let mut all: Vec<&Customer> = self.customers.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    // ------------------------------------------------------------------
    // Mechanics and parts
    // ------------------------------------------------------------------

    pub fn create_mechanic(&mut self, draft: MechanicDraft) -> Result<MechanicId> {
        if draft.name.trim().is_empty() {
            return Err(ShopError::invalid("mechanic name is required"));
        }
        if let Some(rate) = draft.hourly_rate {
            validate::require_non_negative(rate, "hourly rate")?;
        }
        let id = MechanicId(self.mechanics.last_key_value().map_or(1, |(id, _)| id.0 + 1));
        self.mechanics.insert(
            id,
            Mechanic {
                id,
                name: draft.name.trim().to_string(),
                hourly_rate: draft.hourly_rate,
            },
        );
        Ok(id)
    }

    pub fn mechanic(&self, id: MechanicId) -> Option<&Mechanic> {
        self.mechanics.get(&id)
    }

    pub fn create_part(&mut self, draft: PartDraft) -> Result<PartId> {
        if draft.name.trim().is_empty() {
            return Err(ShopError::invalid("part name is required"));
        }
        validate::require_non_negative(draft.price, "price")?;
        let id = PartId(self.parts.last_key_value().map_or(1, |(id, _)| id.0 + 1));
        self.parts.insert(id, build_part(id, draft));
        Ok(id)
    }

    /// Replace a part's fields wholesale. Ticket part usages keep the unit
    /// price they captured when they were attached.
    pub fn update_part(&mut self, id: PartId, draft: PartDraft) -> Result<()> {
        if !self.parts.contains_key(&id) {
            return Err(ShopError::not_found("part", id.0));
        }
        validate::require_non_negative(draft.price, "price")?;
        self.parts.insert(id, build_part(id, draft));
        Ok(())
    }

    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.parts.get(&id)
    }

    /// All parts, ordered by name.
    pub fn parts(&self) -> Vec<&Part> {
        let mut all: Vec<&Part> = self.parts.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    // ------------------------------------------------------------------
    // Boats and customer engines
    // ------------------------------------------------------------------

    pub fn create_boat(
        &mut self,
        customer_id: CustomerId,
        make: impl Into<String>,
        model: impl Into<String>,
        year: Option<i32>,
    ) -> Result<BoatId> {
        self.require_customer(customer_id)?;
        let id = BoatId(self.boats.last_key_value().map_or(1, |(id, _)| id.0 + 1));
        self.boats.insert(
            id,
            Boat {
                id,
                customer_id,
                make: make.into(),
                model: model.into(),
                year,
            },
        );
        Ok(id)
    }

    pub fn boat(&self, id: BoatId) -> Option<&Boat> {
        self.boats.get(&id)
    }

    pub fn create_engine(
        &mut self,
        boat_id: BoatId,
        engine_type: impl Into<String>,
        hp: Option<i32>,
        serial_number: Option<&str>,
        outdrive: Option<String>,
    ) -> Result<EngineId> {
        if !self.boats.contains_key(&boat_id) {
            return Err(ShopError::not_found("boat", boat_id.0));
        }
        if let Some(serial) = serial_number {
            validate::validate_serial(serial)?;
        }
        let id = EngineId(self.engines.last_key_value().map_or(1, |(id, _)| id.0 + 1));
        self.engines.insert(
            id,
            Engine {
                id,
                boat_id,
                engine_type: engine_type.into(),
                hp,
                serial_number: serial_number.map(String::from),
                outdrive,
            },
        );
        Ok(id)
    }

    pub fn engine(&self, id: EngineId) -> Option<&Engine> {
        self.engines.get(&id)
    }

    // ------------------------------------------------------------------
    // New-engine inventory
    // ------------------------------------------------------------------

    pub fn create_new_engine(
        &mut self,
        hp: i32,
        model: impl Into<String>,
        serial_number: &str,
        purchase_price: Option<Decimal>,
        notes: Option<String>,
    ) -> Result<NewEngineId> {
        validate::validate_serial(serial_number)?;
        if let Some(price) = purchase_price {
            validate::require_non_negative(price, "purchase price")?;
        }
        let id = NewEngineId(
            self.new_engines
                .last_key_value()
                .map_or(1, |(id, _)| id.0 + 1),
        );
        self.new_engines.insert(
            id,
            NewEngine {
                id,
                hp,
                model: model.into(),
                serial_number: serial_number.to_string(),
                status: StockStatus::InStock,
                customer_id: None,
                boat_id: None,
                purchase_price,
                sale_price: None,
                date_sold: None,
                date_installed: None,
                paid_in_full: false,
                registered: false,
                registration_date: None,
                notes,
            },
        );
        Ok(id)
    }

    /// Sell an in-stock engine to a customer. Anything already sold (or
    /// otherwise out of stock) cannot be sold again.
    pub fn sell_new_engine(&mut self, id: NewEngineId, terms: SaleTerms) -> Result<()> {
        self.require_customer(terms.customer_id)?;
        validate::require_positive(terms.sale_price, "sale price")?;
        let engine = self
            .new_engines
            .get_mut(&id)
            .ok_or(ShopError::not_found("new engine", id.0))?;
        if engine.status != StockStatus::InStock {
            return Err(ShopError::invalid(format!(
                "new engine {id} is not in stock"
            )));
        }
        engine.status = StockStatus::Sold;
        engine.customer_id = Some(terms.customer_id);
        engine.boat_id = terms.boat_id;
        engine.sale_price = Some(terms.sale_price);
        engine.date_sold = Some(terms.date_sold);
        engine.date_installed = terms.date_installed;
        engine.paid_in_full = terms.paid_in_full;
        debug!("sold new engine {id} to customer {}", terms.customer_id);
        Ok(())
    }

    pub fn mark_engine_paid(&mut self, id: NewEngineId) -> Result<()> {
        let engine = self
            .new_engines
            .get_mut(&id)
            .ok_or(ShopError::not_found("new engine", id.0))?;
        engine.paid_in_full = true;
        Ok(())
    }

    pub fn mark_engine_registered(&mut self, id: NewEngineId, date: NaiveDate) -> Result<()> {
        let engine = self
            .new_engines
            .get_mut(&id)
            .ok_or(ShopError::not_found("new engine", id.0))?;
        engine.registered = true;
        engine.registration_date = Some(date);
        Ok(())
    }

    pub fn new_engine(&self, id: NewEngineId) -> Option<&NewEngine> {
        self.new_engines.get(&id)
    }

    /// New engines, optionally filtered by stock status.
    pub fn new_engines(&self, status: Option<StockStatus>) -> Vec<&NewEngine> {
        self.new_engines
            .values()
            .filter(|engine| status.map_or(true, |s| engine.status == s))
            .collect()
    }

    /// Sold units due for manufacturer registration as of the given date,
    /// ordered by installation date.
    pub fn engines_needing_registration(&self, as_of: NaiveDate) -> Vec<&NewEngine> {
        let mut due: Vec<&NewEngine> = self
            .new_engines
            .values()
            .filter(|engine| engine.needs_registration(as_of))
            .collect();
        due.sort_by_key(|engine| engine.date_installed);
        due
    }

    // ------------------------------------------------------------------
    // Tickets
    // ------------------------------------------------------------------

    pub fn create_ticket(
        &mut self,
        customer_id: CustomerId,
        boat_id: BoatId,
        engine_id: Option<EngineId>,
        description: Option<String>,
        date_opened: NaiveDate,
    ) -> Result<TicketId> {
        self.require_customer(customer_id)?;
        if !self.boats.contains_key(&boat_id) {
            return Err(ShopError::not_found("boat", boat_id.0));
        }
        if let Some(engine_id) = engine_id {
            if !self.engines.contains_key(&engine_id) {
                return Err(ShopError::not_found("engine", engine_id.0));
            }
        }
        let id = TicketId(self.tickets.last_key_value().map_or(1, |(id, _)| id.0 + 1));
        self.tickets.insert(
            id,
            Ticket {
                id,
                customer_id,
                boat_id,
                engine_id,
                description,
                date_opened,
                status: TicketStatus::Open,
                date_closed: None,
                totals: Totals::default(),
                payment_method: None,
                parts: Vec::new(),
                labor: Vec::new(),
            },
        );
        debug!("opened ticket {id} for customer {customer_id}");
        Ok(id)
    }

    pub fn ticket(&self, id: TicketId) -> Option<&Ticket> {
        self.tickets.get(&id)
    }

    /// Tickets, newest first, optionally filtered by status.
    pub fn tickets(&self, status: Option<TicketStatus>) -> Vec<&Ticket> {
        let mut all: Vec<&Ticket> = self
            .tickets
            .values()
            .filter(|ticket| status.map_or(true, |s| ticket.status == s))
            .collect();
        all.sort_by(|a, b| b.date_opened.cmp(&a.date_opened));
        all
    }

    /// Move a ticket to a new status. Any state may move to any other
    /// state; no legality check is performed. Closing stamps the closed
    /// date.
    pub fn set_ticket_status(
        &mut self,
        id: TicketId,
        status: TicketStatus,
        as_of: NaiveDate,
    ) -> Result<()> {
        let ticket = self
            .tickets
            .get_mut(&id)
            .ok_or(ShopError::not_found("ticket", id.0))?;
        debug!("ticket {id}: {} -> {status}", ticket.status);
        ticket.status = status;
        if status == TicketStatus::Closed {
            ticket.date_closed = Some(as_of);
        }
        Ok(())
    }

    /// Attach a part to a ticket. The unit price is captured now (the
    /// override if one is given, the part's current catalog price
    /// otherwise); later catalog edits do not change it.
    pub fn add_ticket_part(
        &mut self,
        ticket_id: TicketId,
        part_id: PartId,
        quantity: Decimal,
        price_override: Option<Decimal>,
    ) -> Result<()> {
        validate::require_positive(quantity, "quantity")?;
        let catalog_price = self
            .parts
            .get(&part_id)
            .ok_or(ShopError::not_found("part", part_id.0))?
            .price;
        let unit_price = match price_override {
            Some(price) => {
                validate::require_non_negative(price, "price override")?;
                price
            }
            None => catalog_price,
        };
        let ticket = self
            .tickets
            .get_mut(&ticket_id)
            .ok_or(ShopError::not_found("ticket", ticket_id.0))?;
        ticket.parts.push(PartUsage {
            part_id,
            quantity,
            unit_price,
        });
        Ok(())
    }

    /// Add a labor entry. The hourly rate is resolved here (override, else
    /// the class rate for the ticket's engine, else the mechanic's stored
    /// rate, else the outboard rate) and stamped on the entry for good.
    pub fn add_ticket_labor(
        &mut self,
        ticket_id: TicketId,
        mechanic_id: MechanicId,
        hours: Decimal,
        work_description: Option<String>,
        rate_override: Option<Decimal>,
    ) -> Result<()> {
        validate::require_positive(hours, "hours")?;
        let mechanic_rate = self
            .mechanics
            .get(&mechanic_id)
            .ok_or(ShopError::not_found("mechanic", mechanic_id.0))?
            .hourly_rate;
        let ticket = self
            .tickets
            .get(&ticket_id)
            .ok_or(ShopError::not_found("ticket", ticket_id.0))?;
        let engine_type = ticket
            .engine_id
            .and_then(|engine_id| self.engines.get(&engine_id))
            .map(|engine| engine.engine_type.clone());
        let rate = resolve_labor_rate(
            rate_override,
            engine_type.as_deref(),
            mechanic_rate,
            &self.rate_table,
        );
        debug!("ticket {ticket_id}: labor by mechanic {mechanic_id} at {rate}/hr");
        let ticket = self
            .tickets
            .get_mut(&ticket_id)
            .ok_or(ShopError::not_found("ticket", ticket_id.0))?;
        ticket.labor.push(LaborEntry {
            mechanic_id,
            hours,
            work_description,
            rate,
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Totals
    // ------------------------------------------------------------------

    /// Gather the snapshot of a ticket's billable child records that the
    /// aggregator consumes. Callers holding a snapshot across other
    /// mutations are exposed to the documented read-then-write race.
    pub fn ticket_charges(
        &self,
        ticket_id: TicketId,
        new_engine_id: Option<NewEngineId>,
    ) -> Result<TicketCharges> {
        let ticket = self
            .tickets
            .get(&ticket_id)
            .ok_or(ShopError::not_found("ticket", ticket_id.0))?;

        let mut parts = Vec::with_capacity(ticket.parts.len());
        for usage in &ticket.parts {
            let taxable = self
                .parts
                .get(&usage.part_id)
                .ok_or(ShopError::not_found("part", usage.part_id.0))?
                .taxable;
            parts.push(PartCharge {
                quantity: usage.quantity,
                unit_price: usage.unit_price,
                taxable,
            });
        }

        let labor = ticket
            .labor
            .iter()
            .map(|entry| LaborCharge {
                hours: entry.hours,
                rate: entry.rate,
            })
            .collect();

        let equipment_sale_price = match new_engine_id {
            Some(id) => {
                self.new_engines
                    .get(&id)
                    .ok_or(ShopError::not_found("new engine", id.0))?
                    .sale_price
            }
            None => None,
        };

        Ok(TicketCharges {
            parts,
            labor,
            equipment_sale_price,
        })
    }

    /// Recompute and persist a ticket's totals. Gathers the snapshot, runs
    /// the pure aggregation, writes the result back, and returns it.
    /// Nothing calls this automatically: after mutating parts, labor, or
    /// the equipment sale it is the caller's job to re-invoke it.
    pub fn calculate_ticket_totals(
        &mut self,
        ticket_id: TicketId,
        payment_method: Option<&str>,
        new_engine_id: Option<NewEngineId>,
    ) -> Result<Totals> {
        let customer_id = self
            .tickets
            .get(&ticket_id)
            .ok_or(ShopError::not_found("ticket", ticket_id.0))?
            .customer_id;
        let customer = self
            .customers
            .get(&customer_id)
            .cloned()
            .ok_or(ShopError::not_found("customer", customer_id.0))?;
        let charges = self.ticket_charges(ticket_id, new_engine_id)?;
        let totals = totals::ticket_totals(&customer, &charges, payment_method);
        self.apply_ticket_totals(ticket_id, totals, payment_method.map(String::from))?;
        Ok(totals)
    }

    /// Write-back half of a recompute. Exposed separately so a caller can
    /// pair it with a previously gathered snapshot; when two recomputes
    /// overlap, the later apply wins.
    pub fn apply_ticket_totals(
        &mut self,
        ticket_id: TicketId,
        totals: Totals,
        payment_method: Option<String>,
    ) -> Result<()> {
        let ticket = self
            .tickets
            .get_mut(&ticket_id)
            .ok_or(ShopError::not_found("ticket", ticket_id.0))?;
        debug!(
            "ticket {ticket_id}: totals {} / {} / {}",
            totals.subtotal, totals.tax_amount, totals.total
        );
        ticket.totals = totals;
        ticket.payment_method = payment_method;
        Ok(())
    }

    /// Recompute and persist an estimate's totals. Estimate lines are all
    /// taxable and there is never an equipment sale.
    pub fn calculate_estimate_totals(&mut self, estimate_id: EstimateId) -> Result<Totals> {
        let estimate = self
            .estimates
            .get(&estimate_id)
            .ok_or(ShopError::not_found("estimate", estimate_id.0))?;
        let customer = self
            .customers
            .get(&estimate.customer_id)
            .cloned()
            .ok_or(ShopError::not_found("customer", estimate.customer_id.0))?;
        let totals = totals::estimate_totals(&customer, &estimate.line_items);
        let estimate = self
            .estimates
            .get_mut(&estimate_id)
            .ok_or(ShopError::not_found("estimate", estimate_id.0))?;
        estimate.totals = totals;
        Ok(totals)
    }

    // ------------------------------------------------------------------
    // Estimates
    // ------------------------------------------------------------------

    pub fn create_estimate(
        &mut self,
        draft: EstimateDraft,
        date_created: NaiveDate,
    ) -> Result<EstimateId> {
        self.require_customer(draft.customer_id)?;
        let id = EstimateId(
            self.estimates
                .last_key_value()
                .map_or(1, |(id, _)| id.0 + 1),
        );
        self.estimates.insert(
            id,
            Estimate {
                id,
                customer_id: draft.customer_id,
                boat_id: draft.boat_id,
                engine_id: draft.engine_id,
                date_created,
                insurance_company: draft.insurance_company,
                claim_number: draft.claim_number,
                notes: draft.notes,
                totals: Totals::default(),
                line_items: Vec::new(),
            },
        );
        Ok(id)
    }

    pub fn add_estimate_line_item(
        &mut self,
        estimate_id: EstimateId,
        kind: LineItemKind,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Result<()> {
        let item = EstimateLineItem::new(kind, description, quantity, unit_price)?;
        let estimate = self
            .estimates
            .get_mut(&estimate_id)
            .ok_or(ShopError::not_found("estimate", estimate_id.0))?;
        estimate.line_items.push(item);
        Ok(())
    }

    pub fn estimate(&self, id: EstimateId) -> Option<&Estimate> {
        self.estimates.get(&id)
    }

    /// Estimates, newest first.
    pub fn estimates(&self) -> Vec<&Estimate> {
        let mut all: Vec<&Estimate> = self.estimates.values().collect();
        all.sort_by(|a, b| b.date_created.cmp(&a.date_created));
        all
    }

    // ------------------------------------------------------------------
    // Payments
    // ------------------------------------------------------------------

    /// Record a payment against a ticket. Payments are append-only and no
    /// check is made against the outstanding balance: overpayment is
    /// permitted and simply drives the balance negative.
    pub fn add_payment(
        &mut self,
        ticket_id: TicketId,
        amount: Decimal,
        method: Option<&str>,
        notes: Option<&str>,
        date: NaiveDate,
    ) -> Result<()> {
        if !self.tickets.contains_key(&ticket_id) {
            return Err(ShopError::not_found("ticket", ticket_id.0));
        }
        validate::require_positive(amount, "payment amount")?;
        debug!("ticket {ticket_id}: payment {amount} on {date}");
        self.payments.push(Payment {
            ticket_id,
            amount,
            date,
            method: method.map(String::from),
            notes: notes.map(String::from),
        });
        Ok(())
    }

    /// Payments for a ticket, ordered by date.
    pub fn payments(&self, ticket_id: TicketId) -> Vec<&Payment> {
        let mut for_ticket: Vec<&Payment> = self
            .payments
            .iter()
            .filter(|payment| payment.ticket_id == ticket_id)
            .collect();
        for_ticket.sort_by_key(|payment| payment.date);
        for_ticket
    }

    /// Persisted total minus everything paid. Zero totals (never computed)
    /// leave the full payment sum as a credit.
    pub fn balance_due(&self, ticket_id: TicketId) -> Result<Decimal> {
        let total = self
            .tickets
            .get(&ticket_id)
            .ok_or(ShopError::not_found("ticket", ticket_id.0))?
            .totals
            .total;
        Ok(ledger::balance_due(
            total,
            self.payments
                .iter()
                .filter(|payment| payment.ticket_id == ticket_id),
        ))
    }

    // ------------------------------------------------------------------
    // Invoices
    // ------------------------------------------------------------------

    /// Assemble the fully priced invoice document for a ticket.
    pub fn ticket_invoice(&self, ticket_id: TicketId) -> Result<TicketInvoice> {
        let ticket = self
            .tickets
            .get(&ticket_id)
            .ok_or(ShopError::not_found("ticket", ticket_id.0))?;
        let customer = self
            .customers
            .get(&ticket.customer_id)
            .ok_or(ShopError::not_found("customer", ticket.customer_id.0))?;
        let boat = self
            .boats
            .get(&ticket.boat_id)
            .ok_or(ShopError::not_found("boat", ticket.boat_id.0))?;

        let mut parts = Vec::with_capacity(ticket.parts.len());
        for usage in &ticket.parts {
            let part = self
                .parts
                .get(&usage.part_id)
                .ok_or(ShopError::not_found("part", usage.part_id.0))?;
            parts.push(InvoicePartLine {
                part_number: part.part_number.clone(),
                name: part.name.clone(),
                quantity: usage.quantity,
                unit_price: usage.unit_price,
                line_total: usage.quantity * usage.unit_price,
                taxable: part.taxable,
            });
        }

        let mut labor = Vec::with_capacity(ticket.labor.len());
        for entry in &ticket.labor {
            let mechanic = self
                .mechanics
                .get(&entry.mechanic_id)
                .ok_or(ShopError::not_found("mechanic", entry.mechanic_id.0))?;
            labor.push(InvoiceLaborLine {
                mechanic_name: mechanic.name.clone(),
                description: entry.work_description.clone(),
                hours: entry.hours,
                rate: entry.rate,
                line_total: entry.line_total(),
            });
        }

        let payments: Vec<Payment> = self
            .payments(ticket_id)
            .into_iter()
            .cloned()
            .collect();
        let balance_due = ledger::balance_due(ticket.totals.total, payments.iter());

        Ok(TicketInvoice {
            ticket_id,
            customer_name: customer.name.clone(),
            customer_phone: customer.phone.clone(),
            boat: boat.label(),
            date_opened: ticket.date_opened,
            status: ticket.status,
            description: ticket.description.clone(),
            parts,
            labor,
            totals: ticket.totals,
            payment_method: ticket.payment_method.clone(),
            payments,
            balance_due,
        })
    }

    fn require_customer(&self, id: CustomerId) -> Result<&Customer> {
        self.customers
            .get(&id)
            .ok_or(ShopError::not_found("customer", id.0))
    }
}

fn build_customer(id: CustomerId, draft: CustomerDraft) -> Result<Customer> {
    if draft.name.trim().is_empty() {
        return Err(ShopError::invalid("customer name is required"));
    }
    let phone = match draft.phone.as_deref() {
        Some(raw) => {
            let normalized = validate::normalize_phone(raw)?;
            (!normalized.is_empty()).then_some(normalized)
        }
        None => None,
    };
    if let Some(email) = draft.email.as_deref() {
        validate::validate_email(email)?;
    }
    Ok(Customer {
        id,
        name: draft.name.trim().to_string(),
        phone,
        email: draft.email,
        address: draft.address,
        tax_exempt: draft.tax_exempt,
        tax_exempt_certificate: draft.tax_exempt_certificate,
        out_of_state: draft.out_of_state,
    })
}

fn build_part(id: PartId, draft: PartDraft) -> Part {
    Part {
        id,
        part_number: draft.part_number,
        name: draft.name.trim().to_string(),
        stock_quantity: draft.stock_quantity,
        price: draft.price,
        supplier_name: draft.supplier_name,
        cost_from_supplier: draft.cost_from_supplier,
        retail_price: draft.retail_price,
        taxable: draft.taxable,
    }
}
