use crate::models::{LedgerRecord, ProductLine};
use crate::normalize::classification_tag;
use crate::schema::TW_TAG_PREFIX;

impl ProductLine {
    /// TW when the tag carries the two-wheeler prefix (case-sensitive), IGL otherwise.
    pub fn classify(tag: &str) -> Self {
        if tag.starts_with(TW_TAG_PREFIX) {
            Self::Tw
        } else {
            Self::Igl
        }
    }
}

pub struct Partition {
    pub igl: Vec<LedgerRecord>,
    pub tw: Vec<LedgerRecord>,
}

/// Split ledger rows into the two product lines, keeping input order in each.
pub fn partition(records: Vec<LedgerRecord>) -> Partition {
    let mut igl = Vec::new();
    let mut tw = Vec::new();
    for record in records {
        match ProductLine::classify(&classification_tag(&record.account_id)) {
            ProductLine::Igl => igl.push(record),
            ProductLine::Tw => tw.push(record),
        }
    }
    Partition { igl, tw }
}
