//! Gap analysis and citation report commands

use littrack_analysis::{CitationReport, GapAnalysisReport};
use littrack_common::{
    errors::Result,
    filters::{ExportScope, FilterSet},
};

use super::Context;
use crate::render;

pub fn gaps(ctx: &Context, json: bool, ranked: bool) -> Result<String> {
    let store = ctx.load_store()?;
    let report = GapAnalysisReport::generate(store.entries(), ctx.now)?;

    if json {
        return render::to_json(&report);
    }
    Ok(render::gap_report(&report, ranked))
}

pub fn report(ctx: &Context, scope: ExportScope, filters: &FilterSet, json: bool) -> Result<String> {
    let store = ctx.load_store()?;
    let selected: Vec<_> = scope
        .select(store.entries(), filters)
        .into_iter()
        .cloned()
        .collect();

    if selected.is_empty() {
        return Ok("No data available for citation report".to_string());
    }

    let report = CitationReport::generate(&selected, ctx.research_question(&store), ctx.now)?;
    if json {
        return render::to_json(&report);
    }
    Ok(render::citation_report(&report))
}
