use crate::error::LedgerError;
use chrono::NaiveDate;
use core_types::validation::{validate_amount, validate_name, validate_rate};
use core_types::{Advisor, AdvisorId, AdvisorUpdate, Field, LedgerSnapshot, Sale, SaleId};
use rust_decimal::Decimal;

/// Holds every advisor, in insertion order, together with the advisor id counter.
/// Its sole responsibility is to keep the entity invariants; it never persists.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    advisors: Vec<Advisor>,
    next_id: AdvisorId,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Creates an empty ledger whose first advisor will receive id 1.
    pub fn new() -> Self {
        Self {
            advisors: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a ledger from persisted state.
    ///
    /// Counters are raised so that no id already present can be issued again:
    /// `next_id` ends up above every advisor id, and each advisor's
    /// `next_sale_id` above every sale id it holds.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        let mut advisors = snapshot.advisors;
        for advisor in &mut advisors {
            advisor.next_sale_id = advisor.next_sale_id.max(advisor.first_free_sale_id());
        }

        let first_free_id = advisors
            .iter()
            .map(|a| a.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        Self {
            advisors,
            next_id: snapshot.next_id.max(first_free_id),
        }
    }

    /// Produces the full persisted form of the ledger.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            advisors: self.advisors.clone(),
            next_id: self.next_id,
        }
    }

    pub fn advisors(&self) -> &[Advisor] {
        &self.advisors
    }

    /// The id the next created advisor will receive.
    pub fn next_id(&self) -> AdvisorId {
        self.next_id
    }

    pub fn advisor(&self, id: AdvisorId) -> Option<&Advisor> {
        self.advisors.iter().find(|a| a.id == id)
    }

    fn advisor_mut(&mut self, id: AdvisorId) -> Result<&mut Advisor, LedgerError> {
        self.advisors
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(LedgerError::AdvisorNotFound(id))
    }

    /// Registers a new advisor with no sales.
    pub fn add_advisor(&mut self, name: &str, commission_rate: Decimal) -> Result<Advisor, LedgerError> {
        let name = validate_name(Field::AdvisorName, name)?;
        let commission_rate = validate_rate(commission_rate)?;

        // The counter must be able to move past the id handed out.
        let following = self
            .next_id
            .checked_add(1)
            .ok_or(LedgerError::IdsExhausted("advisor"))?;

        let advisor = Advisor::new(self.next_id, name, commission_rate);
        self.next_id = following;
        self.advisors.push(advisor.clone());

        tracing::debug!(advisor_id = advisor.id, "Advisor added to ledger.");
        Ok(advisor)
    }

    /// Applies a partial update. Supplied fields are validated with the same
    /// rules as creation; nothing is changed unless all of them pass.
    pub fn update_advisor(&mut self, id: AdvisorId, update: AdvisorUpdate) -> Result<Advisor, LedgerError> {
        let name = update
            .name
            .as_deref()
            .map(|n| validate_name(Field::AdvisorName, n))
            .transpose()?;
        let commission_rate = update.commission_rate.map(validate_rate).transpose()?;

        let advisor = self.advisor_mut(id)?;
        if let Some(name) = name {
            advisor.name = name;
        }
        if let Some(rate) = commission_rate {
            advisor.commission_rate = rate;
        }

        Ok(advisor.clone())
    }

    /// Removes an advisor together with every sale it owns.
    pub fn delete_advisor(&mut self, id: AdvisorId) -> Result<Advisor, LedgerError> {
        let index = self
            .advisors
            .iter()
            .position(|a| a.id == id)
            .ok_or(LedgerError::AdvisorNotFound(id))?;

        Ok(self.advisors.remove(index))
    }

    /// Records a sale under an existing advisor.
    pub fn add_sale(
        &mut self,
        advisor_id: AdvisorId,
        name: &str,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<Sale, LedgerError> {
        // --- 1. Existence ---
        let advisor = self.advisor_mut(advisor_id)?;

        // --- 2. Validation ---
        let name = validate_name(Field::SaleName, name)?;
        let amount = validate_amount(amount)?;

        // --- 3. Assign the id and append ---
        // Ids come from a per-advisor counter so a deletion never frees one up
        // for reuse.
        let id = advisor.next_sale_id.max(advisor.first_free_sale_id());
        let following = id.checked_add(1).ok_or(LedgerError::IdsExhausted("sale"))?;
        let sale = Sale {
            id,
            name,
            amount,
            date,
        };
        advisor.next_sale_id = following;
        advisor.sales.push(sale.clone());

        tracing::debug!(advisor_id, sale_id = sale.id, "Sale added to ledger.");
        Ok(sale)
    }

    /// Removes a single sale from an advisor.
    pub fn delete_sale(&mut self, advisor_id: AdvisorId, sale_id: SaleId) -> Result<Sale, LedgerError> {
        let advisor = self.advisor_mut(advisor_id)?;
        let index = advisor
            .sales
            .iter()
            .position(|s| s.id == sale_id)
            .ok_or(LedgerError::SaleNotFound { advisor_id, sale_id })?;

        Ok(advisor.sales.remove(index))
    }
}
