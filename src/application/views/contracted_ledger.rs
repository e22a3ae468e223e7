//! Contracted ledger state: search and date ordering of contracted records.

use serde::Serialize;

use crate::domain::freight::{DerivedMetrics, FreightRecord};

/// Order of the ledger by contracting time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerSort {
    Asc,
    #[default]
    Desc,
}

impl LedgerSort {
    pub fn toggled(self) -> Self {
        match self {
            LedgerSort::Asc => LedgerSort::Desc,
            LedgerSort::Desc => LedgerSort::Asc,
        }
    }
}

/// One ledger line: the record with its savings figures.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry<'a> {
    pub record: &'a FreightRecord,
    pub metrics: Option<DerivedMetrics>,
}

#[derive(Debug, Clone, Default)]
pub struct ContractedLedger {
    records: Vec<FreightRecord>,
    search: String,
    sort: LedgerSort,
}

impl ContractedLedger {
    pub fn new(records: Vec<FreightRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn sort(&self) -> LedgerSort {
        self.sort
    }

    pub fn toggle_sort(&mut self) {
        self.sort = self.sort.toggled();
    }

    /// Swaps in the stored version of one record, e.g. after an invoice upload.
    pub fn replace(&mut self, record: FreightRecord) {
        match self.records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => *slot = record,
            None => self.records.push(record),
        }
    }

    /// Matching records in the current order.
    ///
    /// The search matches map number or selected carrier, ignoring case.
    pub fn entries(&self) -> Vec<LedgerEntry<'_>> {
        let term = self.search.trim().to_lowercase();
        let mut visible: Vec<&FreightRecord> = self
            .records
            .iter()
            .filter(|r| {
                term.is_empty()
                    || r.map_number().to_lowercase().contains(&term)
                    || r
                        .selected_carrier()
                        .is_some_and(|c| c.to_lowercase().contains(&term))
            })
            .collect();

        visible.sort_by_key(|r| r.contracted_at());
        if self.sort == LedgerSort::Desc {
            visible.reverse();
        }

        visible
            .into_iter()
            .map(|record| LedgerEntry {
                record,
                metrics: record.derived_metrics(),
            })
            .collect()
    }
}
