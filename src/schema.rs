//! Column names, constants and renames shared by the importer, the projector
//! and the exporter. The downstream dunning consumer matches on these strings
//! exactly.

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

pub const CLIENT_ID: &str = "ClientID";
pub const BRANCH_ID: &str = "BranchID";
pub const BRANCH_NAME: &str = "BranchName";
pub const STATE_NAME: &str = "StateName";
pub const CLIENT_NAME: &str = "ClientName";
pub const ACCOUNT_ID: &str = "AccountID";
pub const TOTAL_DUE: &str = "Total Cur.Inst.Due";

pub const REQUIRED_LEDGER_COLUMNS: &[&str] = &[
    CLIENT_ID,
    BRANCH_ID,
    BRANCH_NAME,
    STATE_NAME,
    CLIENT_NAME,
    ACCOUNT_ID,
    TOTAL_DUE,
];

// ---------------------------------------------------------------------------
// Lookup tables
// ---------------------------------------------------------------------------

/// Source-side column name and the common key it is renamed to.
pub const BRANCH_KEY_RENAME: (&str, &str) = ("OurBranchID", BRANCH_ID);
pub const LANG: &str = "Lang";

pub const MOBILE_KEY_RENAME: (&str, &str) = ("clientid", CLIENT_ID);
pub const MOBILE: &str = "Mobile";

pub const BRANCH_ID_WIDTH: usize = 4;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

pub const LANGUAGE: &str = "Language";
pub const DEMAND_DATE: &str = "Demand Date";
pub const MOBILE1: &str = "Mobile1";
pub const MOBILE2: &str = "Mobile2";
pub const TAG5: &str = "tag5";
pub const PRODUCT_ID: &str = "ProductID";
pub const TEMPLATE_ID: &str = "TemplateID";

// ClientID is published as tag5 and Lang as Language.
pub const OUTPUT_WIDTH: usize = 13;

pub const OUTPUT_COLUMNS: [&str; OUTPUT_WIDTH] = [
    BRANCH_ID,
    BRANCH_NAME,
    STATE_NAME,
    LANGUAGE,
    DEMAND_DATE,
    ACCOUNT_ID,
    MOBILE,
    MOBILE1,
    MOBILE2,
    TOTAL_DUE,
    TAG5,
    PRODUCT_ID,
    TEMPLATE_ID,
];

pub const TEMPLATE_ID_VALUE: &str = "Loan Installment-Good Standing-short";

/// Literal token the consumer expects in the spare mobile slots.
pub const NULL_TOKEN: &str = "NULL";

pub const TW_TAG_PREFIX: &str = "TW";
