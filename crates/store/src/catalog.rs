//! The table catalog
//!
//! A [`Catalog`] is the fixed set of table definitions the store is booted
//! with: the site-profile table plus one definition per administrative
//! ledger. Definitions are reconciled against the live engine on every
//! open and never altered after deploy.

use crate::cascade::{
    BUDGET_LINES_TABLE, PARENT_PLAN_FIELD, PARENT_WORK_PLAN_FIELD, PLANS_TABLE, WORK_PLANS_TABLE,
};
use lumbung_core::{FieldDef, TableDef, INSTALLATION_ID_FIELD, PROFILE_TABLE_KEY};

/// Fixed set of table definitions for one deployment
///
/// The profile definition always carries the reserved `installation_id`
/// column, appended here so no declarative field list ever has to (or may)
/// mention it.
#[derive(Debug, Clone)]
pub struct Catalog {
    defs: Vec<TableDef>,
}

impl Catalog {
    /// Build a catalog from the profile's declared fields and the ledger
    /// definitions
    ///
    /// Any ledger definition using the reserved profile key is dropped;
    /// the profile table is managed through the profile accessor only.
    pub fn new(profile_fields: Vec<FieldDef>, ledgers: Vec<TableDef>) -> Self {
        let mut fields = profile_fields;
        if !fields.iter().any(|f| f.name == INSTALLATION_ID_FIELD) {
            fields.push(FieldDef::text(INSTALLATION_ID_FIELD));
        }
        let mut defs = vec![TableDef::new(PROFILE_TABLE_KEY, fields)];
        defs.extend(ledgers.into_iter().filter(|d| !d.is_profile()));
        Catalog { defs }
    }

    /// The site-profile definition (reserved column included)
    pub fn profile(&self) -> &TableDef {
        // Constructor guarantees the profile def is present and first.
        &self.defs[0]
    }

    /// Every definition, profile included (reconcile order)
    pub fn defs(&self) -> &[TableDef] {
        &self.defs
    }

    /// Look up a ledger definition by key; the profile key yields `None`
    pub fn ledger(&self, key: &str) -> Option<&TableDef> {
        self.defs
            .iter()
            .filter(|d| !d.is_profile())
            .find(|d| d.key == key)
    }

    /// The default village-office catalog
    ///
    /// A representative set of administrative books: site profile,
    /// the regulations ledger, and the planning hierarchy
    /// (plans, work plans, budget lines).
    pub fn village_office() -> Self {
        Catalog::new(
            village_profile_fields(),
            vec![
                regulations_ledger(),
                plans_ledger(),
                work_plans_ledger(),
                budget_lines_ledger(),
            ],
        )
    }
}

/// Declared fields of the site profile (forms never see the reserved
/// installation column, which the catalog appends)
fn village_profile_fields() -> Vec<FieldDef> {
    vec![
        FieldDef::text("village_name").required(),
        FieldDef::text("village_code"),
        FieldDef::text("head_name"),
        FieldDef::long_text("office_address"),
        FieldDef::text("office_phone"),
        FieldDef::text("email"),
        FieldDef::text("website"),
        FieldDef::text("area"),
        FieldDef::number("hamlet_count"),
        FieldDef::number("community_unit_count"),
        FieldDef::number("neighborhood_unit_count"),
        FieldDef::text("district_name"),
        FieldDef::text("regency_name"),
        FieldDef::text("province_name"),
        FieldDef::blob("logo"),
    ]
}

fn regulations_ledger() -> TableDef {
    TableDef::new(
        "regulations",
        vec![
            FieldDef::text("number").required(),
            FieldDef::text("title").required(),
            FieldDef::long_text("subject").required(),
            FieldDef::text("kind"),
            FieldDef::date("enacted_on").required(),
            FieldDef::date("promulgated_on"),
            FieldDef::text("gazette_number"),
            FieldDef::long_text("notes"),
        ],
    )
}

fn plans_ledger() -> TableDef {
    TableDef::new(
        PLANS_TABLE,
        vec![
            FieldDef::number("period_start_year").required(),
            FieldDef::number("period_end_year").required(),
            FieldDef::text("regulation_number").required(),
            FieldDef::date("enacted_on").required(),
            FieldDef::long_text("vision").required(),
            FieldDef::long_text("mission").required(),
            FieldDef::number("indicative_budget"),
            FieldDef::choice("status", ["Draft", "Final", "Revised"]).required(),
            FieldDef::long_text("notes"),
        ],
    )
}

fn work_plans_ledger() -> TableDef {
    TableDef::new(
        WORK_PLANS_TABLE,
        vec![
            FieldDef::number(PARENT_PLAN_FIELD),
            FieldDef::number("year").required(),
            FieldDef::text("sector").required(),
            FieldDef::text("activity").required(),
            FieldDef::text("location"),
            FieldDef::text("volume"),
            FieldDef::text("schedule"),
            FieldDef::text("funding_source"),
            FieldDef::choice("execution_mode", ["Self-managed", "Contracted", "Joint"]),
            FieldDef::number("budget").required(),
            FieldDef::long_text("notes"),
        ],
    )
}

fn budget_lines_ledger() -> TableDef {
    TableDef::new(
        BUDGET_LINES_TABLE,
        vec![
            FieldDef::number(PARENT_WORK_PLAN_FIELD),
            FieldDef::number("year").required(),
            FieldDef::choice("side", ["Income", "Expenditure", "Financing"]).required(),
            FieldDef::text("item").required(),
            FieldDef::number("amount").required(),
            FieldDef::text("funding_source"),
            FieldDef::long_text("notes"),
        ],
    )
}
