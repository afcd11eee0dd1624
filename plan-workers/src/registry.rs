//! Wires the nine worker bodies in this crate into a `WorkerRegistry`.

use crate::{
    analyze_results::AnalyzeResults, clarify_question::ClarifyQuestion,
    common_helpdesk::CommonHelpdesk, es_query_exec::EsQueryExec, es_query_gen::EsQueryGen,
    explain_metadata::ExplainMetadata, metadata_lookup::MetadataLookup, page_query::PageQuery,
    show_results::ShowResults,
};
use plan_core::{DataService, RegistryError, WorkerRegistry};
use plan_llm::LlmClient;
use std::sync::Arc;

/// Register every worker in this crate into `registry`.
///
/// Mirrors how a startup routine wires capabilities once, explicitly
/// (spec.md §4.2, §9) — never via import-time side effects.
pub fn register_all(
    registry: &mut WorkerRegistry,
    llm: Arc<dyn LlmClient>,
    data_service: Arc<dyn DataService>,
) -> Result<(), RegistryError> {
    registry.register(
        crate::common_helpdesk::capability(),
        Arc::new(CommonHelpdesk::new(Arc::clone(&llm))),
    )?;
    registry.register(
        crate::metadata_lookup::capability(),
        Arc::new(MetadataLookup),
    )?;
    registry.register(crate::es_query_gen::capability(), Arc::new(EsQueryGen))?;
    registry.register(
        crate::es_query_exec::capability(),
        Arc::new(EsQueryExec::new(Arc::clone(&data_service))),
    )?;
    registry.register(
        crate::page_query::capability(),
        Arc::new(PageQuery::new(Arc::clone(&data_service))),
    )?;
    registry.register(crate::show_results::capability(), Arc::new(ShowResults))?;
    registry.register(
        crate::clarify_question::capability(),
        Arc::new(ClarifyQuestion),
    )?;
    registry.register(
        crate::explain_metadata::capability(),
        Arc::new(ExplainMetadata),
    )?;
    registry.register(
        crate::analyze_results::capability(),
        Arc::new(AnalyzeResults::new(llm)),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_data_service::MockDataService;
    use plan_llm::test_utils::QueuedLlmClient;

    #[test]
    fn registers_all_nine_workers_once() {
        let llm = Arc::new(QueuedLlmClient::new(Vec::<String>::new()));
        let data_service = Arc::new(MockDataService::default());
        let mut registry = WorkerRegistry::new();
        register_all(&mut registry, llm, data_service).unwrap();
        assert_eq!(registry.len(), 9);
        for name in [
            "common_helpdesk",
            "metadata_lookup",
            "es_query_gen",
            "es_query_exec",
            "page_query",
            "show_results",
            "clarify_question",
            "explain_metadata",
            "analyze_results",
        ] {
            assert!(registry.contains(name), "missing {name}");
        }
    }
}
