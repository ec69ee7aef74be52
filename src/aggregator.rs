use std::collections::HashMap;

use crate::models::{ClientTotal, LedgerRecord};

/// Compensated (Kahan) running sum.
#[derive(Debug, Default, Clone, Copy)]
struct DueSum {
    sum: f64,
    compensation: f64,
}

impl DueSum {
    fn add(&mut self, value: f64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }
}

/// Sum the due amount per client and keep the first row seen for each client.
///
/// Descriptive fields come from that first row even when later rows for the
/// same client differ; only the total reflects every row. Sums are
/// compensated so dues that cancel out total exactly zero.
pub fn aggregate_by_client(records: Vec<LedgerRecord>) -> Vec<ClientTotal> {
    let mut position: HashMap<String, usize> = HashMap::new();
    let mut firsts: Vec<LedgerRecord> = Vec::new();
    let mut sums: Vec<DueSum> = Vec::new();

    for record in records {
        let key = record.client_id.trim().to_string();
        let due = record.total_due;
        let idx = match position.get(&key) {
            Some(&idx) => idx,
            None => {
                position.insert(key, firsts.len());
                sums.push(DueSum::default());
                firsts.push(record);
                firsts.len() - 1
            }
        };
        sums[idx].add(due);
    }

    firsts
        .into_iter()
        .zip(sums)
        .map(|(record, due)| ClientTotal {
            record,
            total_due: due.sum,
        })
        .collect()
}
