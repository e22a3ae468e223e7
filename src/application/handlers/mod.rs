//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod freight;
pub mod reporting;

pub use freight::{
    AttachInvoiceCommand, AttachInvoiceHandler, AttachInvoiceResult, CorrectDetailsCommand,
    CorrectDetailsHandler, CorrectDetailsResult, CreateQuotationCommand, CreateQuotationHandler,
    CreateQuotationResult, FinalizeNegotiationCommand, FinalizeNegotiationHandler,
    FinalizeNegotiationResult, ListFreightsHandler, ListFreightsQuery, LoadQuotationFormHandler,
    LoadQuotationFormQuery, RecordProposalCommand, RecordProposalHandler, RecordProposalResult,
    UploadMapImageCommand, UploadMapImageHandler, UploadMapImageResult,
};
pub use reporting::{
    GetChartsHandler, GetChartsQuery, GetFreightReportHandler, GetFreightReportQuery,
};
