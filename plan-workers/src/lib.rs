//! # plan-workers — worker bodies for the FAQ/search scenarios
//!
//! Nine worker bodies plus a deterministic `DataService` mock, driving
//! spec.md §8 scenarios S1-S6: `common_helpdesk`, `metadata_lookup`,
//! `es_query_gen`, `es_query_exec`, `page_query`, `show_results`,
//! `clarify_question`, `explain_metadata`, `analyze_results`.
#![deny(missing_docs)]

mod analyze_results;
mod clarify_question;
mod common_helpdesk;
mod es_query_exec;
mod es_query_gen;
mod explain_metadata;
mod metadata_lookup;
mod mock_data_service;
mod page_query;
mod registry;
mod show_results;

pub use analyze_results::AnalyzeResults;
pub use clarify_question::ClarifyQuestion;
pub use common_helpdesk::CommonHelpdesk;
pub use es_query_exec::EsQueryExec;
pub use es_query_gen::EsQueryGen;
pub use explain_metadata::ExplainMetadata;
pub use metadata_lookup::MetadataLookup;
pub use mock_data_service::MockDataService;
pub use page_query::PageQuery;
pub use registry::register_all;
pub use show_results::ShowResults;
