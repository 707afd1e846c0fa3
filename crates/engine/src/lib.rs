//! # Commission Tracker Engine
//!
//! The single command interface the presentation layer talks to. It owns the
//! `Ledger` and the `Repository`, applies every mutation through the ledger,
//! writes the full state back after each successful one, and answers the read
//! queries (reports, summary, listings, CSV export).
//!
//! Mutations are transactional: they run against a copy of the ledger, and the
//! copy only replaces the live state once it has been saved.

use analytics::{
    AdvisorOverview, Report, ReportEngine, ReportFilter, SaleEntry, Summary, advisor_overviews,
    sale_entries,
};
use chrono::{NaiveDate, Utc};
use core_types::{Advisor, AdvisorId, AdvisorUpdate, Sale, SaleId};
use exporter::CsvExporter;
use ledger::{Ledger, LedgerError};
use rust_decimal::Decimal;
use storage::{BlobStore, Repository};

pub mod error;

pub use error::EngineError;

/// The central orchestrator of the commission tracker.
pub struct CommissionEngine<B> {
    ledger: Ledger,
    repository: Repository<B>,
    reports: ReportEngine,
    exporter: CsvExporter,
}

impl<B: BlobStore> CommissionEngine<B> {
    /// Restores the ledger from `repository`, starting empty if nothing was saved yet.
    pub fn open(repository: Repository<B>) -> Result<Self, EngineError> {
        let ledger = Ledger::from_snapshot(repository.load()?);
        tracing::info!(
            advisors = ledger.advisors().len(),
            next_id = ledger.next_id(),
            "Commission ledger opened."
        );
        Ok(Self {
            ledger,
            repository,
            reports: ReportEngine::new(),
            exporter: CsvExporter::new(),
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn repository(&self) -> &Repository<B> {
        &self.repository
    }

    pub fn advisors(&self) -> &[Advisor] {
        self.ledger.advisors()
    }

    pub fn advisor(&self, id: AdvisorId) -> Option<&Advisor> {
        self.ledger.advisor(id)
    }

    // ==========================================================================
    // Mutations
    // ==========================================================================

    pub fn add_advisor(&mut self, name: &str, commission_rate: Decimal) -> Result<Advisor, EngineError> {
        let advisor = self.commit(|ledger| ledger.add_advisor(name, commission_rate))?;
        tracing::info!(advisor_id = advisor.id, name = %advisor.name, "Advisor created.");
        Ok(advisor)
    }

    pub fn update_advisor(&mut self, id: AdvisorId, update: AdvisorUpdate) -> Result<Advisor, EngineError> {
        let advisor = self.commit(|ledger| ledger.update_advisor(id, update))?;
        tracing::info!(advisor_id = id, "Advisor updated.");
        Ok(advisor)
    }

    /// Deletes an advisor and all of their sales. Returns what was removed.
    pub fn delete_advisor(&mut self, id: AdvisorId) -> Result<Advisor, EngineError> {
        let advisor = self.commit(|ledger| ledger.delete_advisor(id))?;
        tracing::info!(advisor_id = id, sales = advisor.sales.len(), "Advisor deleted.");
        Ok(advisor)
    }

    /// Records a sale. Without an explicit date the sale is dated today (UTC).
    pub fn add_sale(
        &mut self,
        advisor_id: AdvisorId,
        name: &str,
        amount: Decimal,
        date: Option<NaiveDate>,
    ) -> Result<Sale, EngineError> {
        let date = date.unwrap_or_else(today);
        let sale = self.commit(|ledger| ledger.add_sale(advisor_id, name, amount, date))?;
        tracing::info!(advisor_id, sale_id = sale.id, amount = %sale.amount, "Sale recorded.");
        Ok(sale)
    }

    pub fn delete_sale(&mut self, advisor_id: AdvisorId, sale_id: SaleId) -> Result<Sale, EngineError> {
        let sale = self.commit(|ledger| ledger.delete_sale(advisor_id, sale_id))?;
        tracing::info!(advisor_id, sale_id, "Sale deleted.");
        Ok(sale)
    }

    /// Runs `operation` on a draft of the ledger, persists the draft, and only then
    /// makes it the live state.
    fn commit<T>(
        &mut self,
        operation: impl FnOnce(&mut Ledger) -> Result<T, LedgerError>,
    ) -> Result<T, EngineError> {
        let mut draft = self.ledger.clone();
        let outcome = operation(&mut draft).inspect_err(|e| {
            tracing::warn!(error = %e, "Ledger operation rejected.");
        })?;

        self.repository.save(&draft.snapshot()).inspect_err(|e| {
            tracing::error!(error = %e, "Failed to persist ledger; change discarded.");
        })?;
        self.ledger = draft;

        Ok(outcome)
    }

    // ==========================================================================
    // Queries
    // ==========================================================================

    pub fn report(&self, filter: &ReportFilter) -> Report {
        self.reports.build_report(self.ledger.advisors(), filter)
    }

    pub fn summary(&self) -> Summary {
        self.reports.summary(self.ledger.advisors())
    }

    pub fn advisor_overviews(&self) -> Vec<AdvisorOverview> {
        advisor_overviews(self.ledger.advisors())
    }

    pub fn sale_entries(&self) -> Vec<SaleEntry> {
        sale_entries(self.ledger.advisors())
    }

    /// `(id, name)` pairs for building an advisor picker.
    pub fn advisor_choices(&self) -> Vec<(AdvisorId, String)> {
        self.ledger
            .advisors()
            .iter()
            .map(|a| (a.id, a.name.clone()))
            .collect()
    }

    pub fn export_csv(&self, filter: &ReportFilter) -> Result<String, EngineError> {
        Ok(self.exporter.export(self.ledger.advisors(), filter)?)
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use storage::{MemoryBlobStore, StorageError};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn engine() -> CommissionEngine<MemoryBlobStore> {
        CommissionEngine::open(Repository::new(MemoryBlobStore::new())).unwrap()
    }

    fn persisted(engine: &CommissionEngine<MemoryBlobStore>) -> Ledger {
        Ledger::from_snapshot(engine.repository().load().unwrap())
    }

    /// A store whose writes can be switched off.
    struct FlakyStore {
        inner: MemoryBlobStore,
        fail_writes: bool,
    }

    impl BlobStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(StorageError::InvalidKey(key.to_string()));
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn every_mutation_is_persisted() {
        let mut engine = engine();

        engine.add_advisor("Ana", dec!(10)).unwrap();
        assert_eq!(persisted(&engine), *engine.ledger());

        engine.add_sale(1, "Deal1", dec!(1000), Some(date("2024-01-15"))).unwrap();
        assert_eq!(persisted(&engine), *engine.ledger());

        engine
            .update_advisor(1, AdvisorUpdate::default().commission_rate(dec!(15)))
            .unwrap();
        assert_eq!(persisted(&engine).advisor(1).unwrap().commission_rate, dec!(15));

        engine.delete_sale(1, 1).unwrap();
        assert!(persisted(&engine).advisor(1).unwrap().sales.is_empty());

        engine.delete_advisor(1).unwrap();
        assert!(persisted(&engine).advisors().is_empty());
        assert_eq!(persisted(&engine).next_id(), 2);
    }

    #[test]
    fn rejected_operations_do_not_write() {
        let mut engine = engine();
        assert!(engine.add_advisor("", dec!(10)).unwrap_err().is_validation());
        assert!(engine.add_advisor("Ana", dec!(150)).unwrap_err().is_validation());
        assert!(engine.delete_advisor(3).unwrap_err().is_not_found());
        assert!(engine.add_sale(3, "Deal", dec!(5), None).unwrap_err().is_not_found());

        assert!(engine.advisors().is_empty());
        assert_eq!(engine.repository().store().get(storage::DEFAULT_KEY).unwrap(), None);
    }

    #[test]
    fn failed_save_leaves_the_ledger_unchanged() {
        let store = FlakyStore {
            inner: MemoryBlobStore::new(),
            fail_writes: false,
        };
        let mut engine = CommissionEngine::open(Repository::new(store)).unwrap();
        engine.add_advisor("Ana", dec!(10)).unwrap();

        engine.repository.store_mut().fail_writes = true;
        let err = engine.add_advisor("Luis", dec!(5)).unwrap_err();

        assert!(matches!(err, EngineError::Storage(_)));
        assert_eq!(engine.advisors().len(), 1);
        assert_eq!(engine.ledger().next_id(), 2);
    }

    #[test]
    fn sales_default_to_today() {
        let mut engine = engine();
        engine.add_advisor("Ana", dec!(10)).unwrap();

        let before = today();
        let sale = engine.add_sale(1, "Deal", dec!(10), None).unwrap();
        let after = today();
        assert!(sale.date == before || sale.date == after);
    }

    #[test]
    fn reopening_restores_the_saved_state() {
        let mut engine = engine();
        engine.add_advisor("Ana", dec!(10)).unwrap();
        engine.add_sale(1, "Deal1", dec!(1000), Some(date("2024-01-15"))).unwrap();
        let expected = engine.ledger().clone();

        let reopened = CommissionEngine::open(engine.repository).unwrap();
        assert_eq!(*reopened.ledger(), expected);
        assert_eq!(reopened.summary().total_sale_count, 1);
    }

    #[test]
    fn queries_reflect_the_live_ledger() {
        let mut engine = engine();
        engine.add_advisor("Ana", dec!(10)).unwrap();
        engine.add_advisor("Luis", dec!(20)).unwrap();
        engine.add_sale(2, "Casa", dec!(500), Some(date("2024-04-01"))).unwrap();

        assert_eq!(engine.advisor_choices(), vec![(1, "Ana".to_string()), (2, "Luis".to_string())]);
        assert_eq!(engine.advisor_overviews()[1].total_commission, dec!(100));
        assert_eq!(engine.sale_entries().len(), 1);
        assert_eq!(engine.report(&ReportFilter::new()).totals.total_commission, dec!(100));

        let csv = engine.export_csv(&ReportFilter::new()).unwrap();
        assert!(csv.contains("Asesor: Luis\n"));
        assert!(!csv.contains("Asesor: Ana"));
    }
}
