//! Page view-models.
//!
//! Plain state holders for the quotation form, the negotiation board and the
//! contracted ledger. They never call ports; they produce handler commands.

mod contracted_ledger;
mod negotiation_board;
mod quotation_form;

pub use contracted_ledger::{ContractedLedger, LedgerEntry, LedgerSort};
pub use negotiation_board::{EditDraft, NegotiationBoard};
pub use quotation_form::QuotationForm;
