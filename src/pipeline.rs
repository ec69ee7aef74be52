use chrono::NaiveDate;

use crate::aggregator::aggregate_by_client;
use crate::classifier::partition;
use crate::enricher::{DuplicateKeyPolicy, Enricher};
use crate::error::Result;
use crate::importer::{self, InputKind};
use crate::models::{DemandExtracts, DemandRecord, EnrichedRow, LedgerRecord, ProductLine};
use crate::schema;

/// One uploaded input: its display name and raw bytes.
#[derive(Debug, Clone, Copy)]
pub struct Upload<'a> {
    pub name: &'a str,
    pub bytes: &'a [u8],
}

/// Build the IGL and TW demand extracts from the three uploads.
///
/// The ledger's columns are checked before anything else is computed; on any
/// error neither extract is returned.
pub fn process(
    ledger: Upload<'_>,
    branch: Upload<'_>,
    mobile: Upload<'_>,
    demand_date: NaiveDate,
    policy: DuplicateKeyPolicy,
) -> Result<DemandExtracts> {
    let ledger_table = InputKind::Ledger.read(ledger.name, ledger.bytes)?;
    importer::validate_ledger_columns(&ledger_table)?;
    let records = importer::ledger_records(&ledger_table)?;
    tracing::info!(rows = records.len(), "ledger loaded");

    let branches = importer::branch_records(&InputKind::Branch.read(branch.name, branch.bytes)?)?;
    let contacts = importer::mobile_records(
        mobile.name,
        &InputKind::Mobile.read(mobile.name, mobile.bytes)?,
    )?;
    tracing::info!(
        branches = branches.len(),
        contacts = contacts.len(),
        "lookup tables loaded"
    );

    let enricher = Enricher::new(&branches, &contacts, policy)?;
    let split = partition(records);

    Ok(DemandExtracts {
        igl: build_extract(ProductLine::Igl, split.igl, &enricher, demand_date),
        tw: build_extract(ProductLine::Tw, split.tw, &enricher, demand_date),
    })
}

fn build_extract(
    line: ProductLine,
    records: Vec<LedgerRecord>,
    enricher: &Enricher,
    demand_date: NaiveDate,
) -> Vec<DemandRecord> {
    let ledger_rows = records.len();
    let totals = aggregate_by_client(records);
    let clients = totals.len();
    let enriched = enricher.enrich(totals);
    let due = filter_zero_due(enriched);
    tracing::info!(
        product = line.product_id(),
        ledger_rows,
        clients,
        demand_rows = due.len(),
        "extract built"
    );
    project(line, due, demand_date)
}

/// Drop rows with nothing outstanding. Exact comparison against zero.
pub fn filter_zero_due(rows: Vec<EnrichedRow>) -> Vec<EnrichedRow> {
    rows.into_iter().filter(|r| r.total.total_due != 0.0).collect()
}

/// Map enriched rows onto the output schema for one product line.
pub fn project(
    line: ProductLine,
    rows: Vec<EnrichedRow>,
    demand_date: NaiveDate,
) -> Vec<DemandRecord> {
    rows.into_iter()
        .map(|row| {
            let record = row.total.record;
            DemandRecord {
                branch_id: record.branch_id,
                branch_name: record.branch_name,
                state_name: record.state_name,
                language: row.lang,
                demand_date,
                account_id: None,
                mobile: row.mobile,
                mobile1: schema::NULL_TOKEN.to_string(),
                mobile2: schema::NULL_TOKEN.to_string(),
                total_due: row.total.total_due,
                tag5: record.client_id,
                product_id: line.product_id().to_string(),
                template_id: schema::TEMPLATE_ID_VALUE.to_string(),
            }
        })
        .collect()
}
