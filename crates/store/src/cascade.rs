//! Hierarchy cascade controller
//!
//! Deletion across the three-level planning hierarchy: a plan's work plans
//! and their budget lines must not survive the plan, and a work plan's
//! budget lines must not survive the work plan.
//!
//! The whole subtree is deleted in one engine-level transaction with a
//! single snapshot write: children first, then the parent. If the write
//! fails, every affected table is rolled back and the failure escalates as
//! `CascadeIncomplete`; no partially deleted subtree is ever durable or
//! visible.

use crate::handle::Store;
use lumbung_core::{Error, Result, Value};
use tracing::info;

/// Table key of the top-level plans ledger
pub const PLANS_TABLE: &str = "plans";

/// Table key of the work-plans ledger
pub const WORK_PLANS_TABLE: &str = "work_plans";

/// Table key of the budget-lines ledger
pub const BUDGET_LINES_TABLE: &str = "budget_lines";

/// Work-plan column referencing the parent plan id
pub const PARENT_PLAN_FIELD: &str = "parent_plan_id";

/// Budget-line column referencing the parent work-plan id
pub const PARENT_WORK_PLAN_FIELD: &str = "parent_work_plan_id";

/// Parent ids are carried in real-valued columns
fn parent_ref(id: i64) -> Value {
    Value::real(id as f64)
}

impl Store {
    /// Delete a plan and its entire subtree
    ///
    /// Removes every budget line under every work plan of the plan, then
    /// the work plans, then the plan row itself. Deleting an absent plan
    /// id still sweeps children that reference it (orphans left by a
    /// pre-transactional image are cleaned up rather than stranded).
    pub fn delete_plan(&mut self, plan_id: i64) -> Result<()> {
        let work_plan_ids = self
            .engine()
            .table(WORK_PLANS_TABLE)
            .map(|t| t.ids_where(PARENT_PLAN_FIELD, &parent_ref(plan_id)))
            .unwrap_or_default();

        let budget_line_ids: Vec<i64> = work_plan_ids
            .iter()
            .flat_map(|wid| self.budget_lines_of(*wid))
            .collect();

        let work_plans = work_plan_ids.len();
        let budget_lines = budget_line_ids.len();

        self.mutate(
            &[BUDGET_LINES_TABLE, WORK_PLANS_TABLE, PLANS_TABLE],
            move |engine| {
                if let Some(table) = engine.table_mut(BUDGET_LINES_TABLE) {
                    for id in budget_line_ids {
                        table.remove(id);
                    }
                }
                if let Some(table) = engine.table_mut(WORK_PLANS_TABLE) {
                    for id in work_plan_ids {
                        table.remove(id);
                    }
                }
                engine.table_mut_or_err(PLANS_TABLE)?.remove(plan_id);
                Ok(())
            },
        )
        .map_err(|e| cascade_error(PLANS_TABLE, plan_id, e))?;

        info!(plan_id, work_plans, budget_lines, "plan subtree deleted");
        Ok(())
    }

    /// Delete a work plan and its budget lines
    pub fn delete_work_plan(&mut self, work_plan_id: i64) -> Result<()> {
        let budget_line_ids = self.budget_lines_of(work_plan_id);
        let budget_lines = budget_line_ids.len();

        self.mutate(&[BUDGET_LINES_TABLE, WORK_PLANS_TABLE], move |engine| {
            if let Some(table) = engine.table_mut(BUDGET_LINES_TABLE) {
                for id in budget_line_ids {
                    table.remove(id);
                }
            }
            engine
                .table_mut_or_err(WORK_PLANS_TABLE)?
                .remove(work_plan_id);
            Ok(())
        })
        .map_err(|e| cascade_error(WORK_PLANS_TABLE, work_plan_id, e))?;

        info!(work_plan_id, budget_lines, "work plan subtree deleted");
        Ok(())
    }

    fn budget_lines_of(&self, work_plan_id: i64) -> Vec<i64> {
        self.engine()
            .table(BUDGET_LINES_TABLE)
            .map(|t| t.ids_where(PARENT_WORK_PLAN_FIELD, &parent_ref(work_plan_id)))
            .unwrap_or_default()
    }
}

fn cascade_error(table: &str, id: i64, source: Error) -> Error {
    Error::CascadeIncomplete {
        table: table.to_string(),
        id,
        source: Box::new(source),
    }
}
